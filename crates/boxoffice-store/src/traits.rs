//! Store traits: the persistence gateway the box office depends on.
//!
//! Every method is synchronous and either fully succeeds, with the write
//! durable before it returns, or fails with a [`StoreError`].
//!
//! [`StoreError`]: crate::StoreError

use boxoffice_core::{Event, EventDraft, EventId, Order, UserRecord};

use crate::error::Result;

/// New remaining-seat count for one event, written at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatUpdate {
    pub event_id: EventId,
    pub remaining_seats: u32,
}

/// User credentials.
pub trait UserStore {
    /// Look up a user by name. Credential checks happen in the caller.
    fn find_user(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Create a user.
    ///
    /// Fails with `DuplicateUser` if the username is taken.
    fn create_user(&self, record: &UserRecord) -> Result<()>;
}

/// Event inventory.
pub trait EventStore {
    /// All events, disabled ones included, in id order.
    fn all_events(&self) -> Result<Vec<Event>>;

    /// Number of stored events.
    fn count_events(&self) -> Result<usize>;

    /// Insert an event and return its generated id.
    fn insert_event(&self, draft: &EventDraft) -> Result<EventId>;

    /// Insert many events at once (seed import). Ids are returned in input order.
    fn insert_events(&self, drafts: &[EventDraft]) -> Result<Vec<EventId>>;

    /// Overwrite every field of an existing event.
    fn update_event(&self, event: &Event) -> Result<()>;

    /// Delete an event. Order history is left untouched.
    fn delete_event(&self, id: EventId) -> Result<()>;

    fn update_remaining_seats(&self, id: EventId, remaining_seats: u32) -> Result<()>;

    fn update_disabled(&self, id: EventId, disabled: bool) -> Result<()>;
}

/// Order history.
pub trait OrderStore {
    /// Persist an order and its lines.
    fn save_order(&self, order: &Order) -> Result<()>;

    /// All orders, newest first, with lines joined against current events.
    fn all_orders(&self) -> Result<Vec<Order>>;
}

/// The full gateway.
pub trait Store: UserStore + EventStore + OrderStore {
    /// Apply seat deductions and save `order` as one unit.
    ///
    /// Either every seat update and the order are persisted, or none are.
    fn record_checkout(&self, seats: &[SeatUpdate], order: &Order) -> Result<()>;
}
