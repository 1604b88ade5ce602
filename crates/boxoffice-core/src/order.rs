//! Order: an immutable record of a completed checkout.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::event::Event;
use crate::types::OrderNumber;

/// Storage format for order timestamps (ISO-8601 local date-time).
pub const STORAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One booked event inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub event: Event,
    pub quantity: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.event.price * f64::from(self.quantity)
    }
}

/// A completed checkout.
///
/// `total` is fixed at checkout time and never recomputed from the lines,
/// which are re-joined against current event records when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub timestamp: NaiveDateTime,
    pub lines: Vec<OrderLine>,
    pub total: f64,
}

impl Order {
    /// Create an order whose total is the sum of its line subtotals.
    pub fn new(number: OrderNumber, timestamp: NaiveDateTime, lines: Vec<OrderLine>) -> Self {
        let total = lines.iter().map(OrderLine::subtotal).sum();
        Self {
            number,
            timestamp,
            lines,
            total,
        }
    }

    /// Reassemble a stored order without touching its recorded total.
    pub fn from_parts(
        number: OrderNumber,
        timestamp: NaiveDateTime,
        lines: Vec<OrderLine>,
        total: f64,
    ) -> Self {
        Self {
            number,
            timestamp,
            lines,
            total,
        }
    }

    /// Total seats across all lines.
    pub fn seat_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// One-line summary such as `Hamlet x2, Macbeth x1`.
    pub fn details(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{} x{}", l.event.name, l.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn storage_timestamp(&self) -> String {
        self.timestamp.format(STORAGE_TIMESTAMP_FORMAT).to_string()
    }
}

/// Parse a timestamp written by [`Order::storage_timestamp`].
pub fn parse_storage_timestamp(raw: &str) -> Result<NaiveDateTime, CoreError> {
    NaiveDateTime::parse_from_str(raw, STORAGE_TIMESTAMP_FORMAT)
        .map_err(|e| CoreError::MalformedTimestamp(format!("{raw:?}: {e}")))
}
