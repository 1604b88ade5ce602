//! Cart: the unpersisted selection of events and quantities.
//!
//! A cart holds at most one [`CartItem`] per event. Adding an event that is
//! already present merges into the existing entry.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::order::OrderLine;
use crate::types::EventId;

/// One event in the cart with the number of seats wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub event_id: EventId,
    pub quantity: u32,
}

/// First cart entry that asks for more seats than remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub event_id: EventId,
    pub requested: u32,
    /// Zero when the event no longer exists.
    pub remaining: u32,
}

/// The current session's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Seats of `event_id` already in the cart (0 if absent).
    pub fn quantity_of(&self, event_id: EventId) -> u32 {
        self.position(event_id)
            .map(|i| self.items[i].quantity)
            .unwrap_or(0)
    }

    pub fn contains(&self, event_id: EventId) -> bool {
        self.position(event_id).is_some()
    }

    /// Add `qty` seats of an event, merging into an existing entry.
    ///
    /// No availability check happens here.
    pub fn add(&mut self, event_id: EventId, qty: u32) {
        match self.position(event_id) {
            Some(i) => self.items[i].quantity = self.items[i].quantity.saturating_add(qty),
            None => self.items.push(CartItem {
                event_id,
                quantity: qty,
            }),
        }
    }

    /// Set the quantity of an existing entry; zero removes it.
    ///
    /// Returns false if the event is not in the cart.
    pub fn update(&mut self, event_id: EventId, new_qty: u32) -> bool {
        let Some(i) = self.position(event_id) else {
            return false;
        };
        if new_qty == 0 {
            self.items.remove(i);
        } else {
            self.items[i].quantity = new_qty;
        }
        true
    }

    /// Same as `update(event_id, 0)`.
    pub fn remove(&mut self, event_id: EventId) -> bool {
        self.update(event_id, 0)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Find the first entry that exceeds its event's remaining seats.
    pub fn shortfall(&self, events: &[Event]) -> Option<Shortfall> {
        self.items.iter().find_map(|item| {
            let remaining = find_event(events, item.event_id)
                .map(|e| e.remaining_seats)
                .unwrap_or(0);
            (item.quantity > remaining).then_some(Shortfall {
                event_id: item.event_id,
                requested: item.quantity,
                remaining,
            })
        })
    }

    /// True iff every entry fits within its event's remaining seats.
    pub fn validate(&self, events: &[Event]) -> bool {
        self.shortfall(events).is_none()
    }

    /// Sum of price × quantity at current prices. Entries for unknown
    /// events contribute nothing.
    pub fn total(&self, events: &[Event]) -> f64 {
        self.items
            .iter()
            .filter_map(|item| {
                find_event(events, item.event_id).map(|e| e.price * f64::from(item.quantity))
            })
            .sum()
    }

    /// Freeze the cart into order lines, capturing each event as it is now.
    pub fn snapshot(&self, events: &[Event]) -> Vec<OrderLine> {
        self.items
            .iter()
            .filter_map(|item| {
                find_event(events, item.event_id).map(|e| OrderLine {
                    event: e.clone(),
                    quantity: item.quantity,
                })
            })
            .collect()
    }

    fn position(&self, event_id: EventId) -> Option<usize> {
        self.items.iter().position(|item| item.event_id == event_id)
    }
}

fn find_event(events: &[Event], id: EventId) -> Option<&Event> {
    events.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(id: i64, price: f64, remaining: u32) -> Event {
        Event {
            id: EventId(id),
            name: format!("Show {}", id),
            date: "Sat".into(),
            venue: "Hall".into(),
            price,
            remaining_seats: remaining,
            disabled: false,
        }
    }

    #[test]
    fn test_add_merges_same_event() {
        let mut cart = Cart::new();
        cart.add(EventId(1), 2);
        cart.add(EventId(2), 1);
        cart.add(EventId(1), 3);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(EventId(1)), 5);
        assert_eq!(cart.items()[0].event_id, EventId(1));
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(EventId(1), 2);
        assert!(cart.update(EventId(1), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(EventId(1), 2);
        assert!(!cart.update(EventId(7), 4));
        assert_eq!(cart.quantity_of(EventId(1)), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_equals_update_zero() {
        let mut a = Cart::new();
        a.add(EventId(1), 2);
        a.add(EventId(2), 2);
        let mut b = a.clone();

        a.remove(EventId(1));
        b.update(EventId(1), 0);
        assert_eq!(a, b);
        assert!(!a.contains(EventId(1)));
    }

    #[test]
    fn test_validate_against_remaining_seats() {
        let events = vec![event(1, 20.0, 5), event(2, 10.0, 1)];
        let mut cart = Cart::new();
        cart.add(EventId(1), 5);
        cart.add(EventId(2), 1);
        assert!(cart.validate(&events));

        cart.add(EventId(2), 1);
        assert_eq!(
            cart.shortfall(&events),
            Some(Shortfall {
                event_id: EventId(2),
                requested: 2,
                remaining: 1
            })
        );
        assert!(!cart.validate(&events));
    }

    #[test]
    fn test_unknown_event_fails_validation() {
        let mut cart = Cart::new();
        cart.add(EventId(3), 1);
        assert!(!cart.validate(&[]));
    }

    #[test]
    fn test_total_and_snapshot() {
        let events = vec![event(1, 20.0, 5), event(2, 10.0, 1)];
        let mut cart = Cart::new();
        cart.add(EventId(1), 2);
        cart.add(EventId(2), 1);

        assert_eq!(cart.total(&events), 50.0);
        let lines = cart.snapshot(&events);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].event.name, "Show 1");
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_serializes_items_in_order() {
        let mut cart = Cart::new();
        cart.add(EventId(2), 1);
        cart.add(EventId(1), 3);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"{"items":[{"event_id":2,"quantity":1},{"event_id":1,"quantity":3}]}"#
        );
    }

    proptest! {
        #[test]
        fn prop_adds_sum_per_event(adds in prop::collection::vec((1i64..4, 1u32..100), 0..30)) {
            let mut cart = Cart::new();
            for &(id, qty) in &adds {
                cart.add(EventId(id), qty);
            }
            for id in 1i64..4 {
                let expected: u32 = adds.iter().filter(|(i, _)| *i == id).map(|(_, q)| q).sum();
                prop_assert_eq!(cart.quantity_of(EventId(id)), expected);
            }
            let distinct = (1i64..4).filter(|id| adds.iter().any(|(i, _)| i == id)).count();
            prop_assert_eq!(cart.len(), distinct);
        }
    }
}
