//! Proptest generators for property-based testing.

use proptest::prelude::*;

use boxoffice::BoxOffice;
use boxoffice_core::{EventDraft, EventId};
use boxoffice_store::Store;

/// Generate a weekday token as stored on events.
pub fn weekday_token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
}

/// Generate a price in whole cents.
pub fn price() -> impl Strategy<Value = f64> {
    (0u32..=20_000).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Generate an event draft with a small seat count, sometimes disabled.
pub fn event_draft() -> impl Strategy<Value = EventDraft> {
    (
        "[A-Z][a-z]{1,11}",
        "[A-Z][a-z]{1,11}",
        weekday_token(),
        price(),
        0u32..=10,
        any::<bool>(),
    )
        .prop_map(|(name, venue, day, price, seats, disabled)| {
            let draft = EventDraft::new(&name, &venue, day, price, seats);
            if disabled {
                draft.disabled()
            } else {
                draft
            }
        })
}

/// A single cart edit. `slot` indexes into the fixture's event ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
    Add { slot: usize, qty: u32 },
    Update { slot: usize, qty: u32 },
    Remove { slot: usize },
}

/// Generate one cart edit over `slots` events.
pub fn cart_op(slots: usize) -> impl Strategy<Value = CartOp> {
    let slot = 0..slots.max(1);
    prop_oneof![
        (slot.clone(), 1u32..=4).prop_map(|(slot, qty)| CartOp::Add { slot, qty }),
        (slot.clone(), 0u32..=6).prop_map(|(slot, qty)| CartOp::Update { slot, qty }),
        slot.prop_map(|slot| CartOp::Remove { slot }),
    ]
}

/// Generate up to `max_len` cart edits over `slots` events.
pub fn cart_ops(slots: usize, max_len: usize) -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(cart_op(slots), 0..=max_len)
}

/// Apply edits with the unchecked cart operations. Slots past the end of
/// `ids` are ignored.
pub fn apply_ops<S: Store>(office: &mut BoxOffice<S>, ids: &[EventId], ops: &[CartOp]) {
    for op in ops {
        match *op {
            CartOp::Add { slot, qty } => {
                if let Some(&id) = ids.get(slot) {
                    let _ = office.add_to_cart(id, qty);
                }
            }
            CartOp::Update { slot, qty } => {
                if let Some(&id) = ids.get(slot) {
                    office.update_cart_quantity(id, qty);
                }
            }
            CartOp::Remove { slot } => {
                if let Some(&id) = ids.get(slot) {
                    office.remove_from_cart(id);
                }
            }
        }
    }
}
