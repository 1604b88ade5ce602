//! Plain-text order report.
//!
//! One block per order, each followed by a blank line:
//!
//! ```text
//! Order Number: 0001
//! Date & Time  : 2024-01-15 14:30:00
//! Items:
//!   • Event Name — 2 seats
//! Total        : $45.00
//! ```

use std::fmt;

use crate::order::Order;

/// Default timestamp format used in the report.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `orders` in the given order. Zero orders yield an empty string.
pub fn render_orders(orders: &[Order], timestamp_format: &str) -> String {
    OrderReport::new(orders, timestamp_format).to_string()
}

/// The order report as a `Display` value, one block per order.
#[derive(Debug, Clone, Copy)]
pub struct OrderReport<'a> {
    orders: &'a [Order],
    timestamp_format: &'a str,
}

impl<'a> OrderReport<'a> {
    pub fn new(orders: &'a [Order], timestamp_format: &'a str) -> Self {
        Self {
            orders,
            timestamp_format,
        }
    }

    fn write_block(&self, f: &mut fmt::Formatter<'_>, order: &Order) -> fmt::Result {
        writeln!(f, "Order Number: {}", order.number)?;
        writeln!(f, "Date & Time  : {}", order.timestamp.format(self.timestamp_format))?;
        writeln!(f, "Items:")?;
        for line in &order.lines {
            writeln!(f, "  • {} — {} seats", line.event.name, line.quantity)?;
        }
        writeln!(f, "Total        : ${:.2}", order.total)?;
        writeln!(f)
    }
}

impl fmt::Display for OrderReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.orders
            .iter()
            .try_for_each(|order| self.write_block(f, order))
    }
}
