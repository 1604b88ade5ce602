//! In-memory implementation of the store traits.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence. Writes can be made
//! to fail on demand to exercise error paths.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use boxoffice_core::{Event, EventDraft, EventId, Order, OrderLine, UserRecord};

use crate::error::{Result, StoreError};
use crate::traits::{EventStore, OrderStore, SeatUpdate, Store, UserStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    users: BTreeMap<String, UserRecord>,

    /// Events keyed by id; iteration order is id order.
    events: BTreeMap<EventId, Event>,
    next_event_id: i64,

    /// Orders in insertion order, lines stored as (event_id, quantity).
    orders: Vec<StoredOrder>,

    fail_writes: bool,
}

struct StoredOrder {
    order: Order,
    lines: Vec<(EventId, u32)>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                next_event_id: 1,
                ..MemoryStoreInner::default()
            }),
        }
    }

    /// Make every subsequent write fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) -> Result<()> {
        self.write()?.fail_writes = fail;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    /// Write access that honors the failure switch.
    fn writable(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        let inner = self.write()?;
        if inner.fail_writes {
            return Err(StoreError::Unavailable("memory store is failing writes".into()));
        }
        Ok(inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    fn event_mut(&mut self, id: EventId) -> Result<&mut Event> {
        self.events
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("event {}", id)))
    }

    fn insert_event(&mut self, draft: &EventDraft) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        self.events.insert(id, Event::from_draft(id, draft.clone()));
        id
    }

    fn push_order(&mut self, order: &Order) -> Result<()> {
        if self.orders.iter().any(|o| o.order.number == order.number) {
            return Err(StoreError::InvalidData(format!(
                "order number {} already recorded",
                order.number
            )));
        }
        self.orders.push(StoredOrder {
            order: Order::from_parts(order.number, order.timestamp, Vec::new(), order.total),
            lines: order
                .lines
                .iter()
                .map(|l| (l.event.id, l.quantity))
                .collect(),
        });
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn find_user(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.read()?.users.get(username).cloned())
    }

    fn create_user(&self, record: &UserRecord) -> Result<()> {
        let mut inner = self.writable()?;
        let username = &record.user.username;
        if inner.users.contains_key(username) {
            return Err(StoreError::DuplicateUser(username.clone()));
        }
        inner.users.insert(username.clone(), record.clone());
        Ok(())
    }
}

impl EventStore for MemoryStore {
    fn all_events(&self) -> Result<Vec<Event>> {
        Ok(self.read()?.events.values().cloned().collect())
    }

    fn count_events(&self) -> Result<usize> {
        Ok(self.read()?.events.len())
    }

    fn insert_event(&self, draft: &EventDraft) -> Result<EventId> {
        Ok(self.writable()?.insert_event(draft))
    }

    fn insert_events(&self, drafts: &[EventDraft]) -> Result<Vec<EventId>> {
        let mut inner = self.writable()?;
        Ok(drafts.iter().map(|d| inner.insert_event(d)).collect())
    }

    fn update_event(&self, event: &Event) -> Result<()> {
        let mut inner = self.writable()?;
        *inner.event_mut(event.id)? = event.clone();
        Ok(())
    }

    fn delete_event(&self, id: EventId) -> Result<()> {
        self.writable()?
            .events
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("event {}", id)))
    }

    fn update_remaining_seats(&self, id: EventId, remaining_seats: u32) -> Result<()> {
        self.writable()?.event_mut(id)?.remaining_seats = remaining_seats;
        Ok(())
    }

    fn update_disabled(&self, id: EventId, disabled: bool) -> Result<()> {
        self.writable()?.event_mut(id)?.disabled = disabled;
        Ok(())
    }
}

impl OrderStore for MemoryStore {
    fn save_order(&self, order: &Order) -> Result<()> {
        self.writable()?.push_order(order)
    }

    fn all_orders(&self) -> Result<Vec<Order>> {
        let inner = self.read()?;
        let orders = inner
            .orders
            .iter()
            .rev()
            .map(|stored| {
                let mut order = stored.order.clone();
                order.lines = stored
                    .lines
                    .iter()
                    .filter_map(|(id, quantity)| {
                        inner.events.get(id).map(|event| OrderLine {
                            event: event.clone(),
                            quantity: *quantity,
                        })
                    })
                    .collect();
                order
            })
            .collect();
        Ok(orders)
    }
}

impl Store for MemoryStore {
    fn record_checkout(&self, seats: &[SeatUpdate], order: &Order) -> Result<()> {
        let mut inner = self.writable()?;

        // Check everything before touching anything.
        for update in seats {
            if !inner.events.contains_key(&update.event_id) {
                return Err(StoreError::NotFound(format!("event {}", update.event_id)));
            }
        }
        inner.push_order(order)?;
        for update in seats {
            inner.event_mut(update.event_id)?.remaining_seats = update.remaining_seats;
        }
        Ok(())
    }
}
