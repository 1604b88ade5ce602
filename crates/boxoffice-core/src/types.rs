//! Strong type definitions for the box office.
//!
//! Identifiers are newtypes so an event id can never be passed where an
//! order number is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an event, assigned by persistence on creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub i64);

impl EventId {
    /// Get the raw value.
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A monotonically increasing order number.
///
/// Displayed zero-padded to four digits (`0001`). Numbers past 9999 are
/// rendered with as many digits as they need.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderNumber(pub u32);

impl OrderNumber {
    /// The first order number handed out on an empty history.
    pub const FIRST: Self = Self(1);

    /// The number following `highest`, or [`OrderNumber::FIRST`] when there
    /// is no history.
    pub fn after(highest: Option<OrderNumber>) -> Self {
        match highest {
            Some(n) => n.next(),
            None => Self::FIRST,
        }
    }

    /// The next number in sequence.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderNumber({:04})", self.0)
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_display_is_zero_padded() {
        assert_eq!(OrderNumber(1).to_string(), "0001");
        assert_eq!(OrderNumber(42).to_string(), "0042");
        assert_eq!(OrderNumber(12345).to_string(), "12345");
    }

    #[test]
    fn test_order_number_after_history() {
        assert_eq!(OrderNumber::after(None), OrderNumber(1));
        assert_eq!(OrderNumber::after(Some(OrderNumber(7))), OrderNumber(8));
    }

    #[test]
    fn test_event_id_debug() {
        assert_eq!(format!("{:?}", EventId(3)), "EventId(3)");
        assert_eq!(EventId(3).to_string(), "#3");
    }
}
