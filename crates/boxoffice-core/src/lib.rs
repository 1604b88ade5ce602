//! # Box Office Core
//!
//! Pure domain primitives for the box office: events, carts, orders and
//! users.
//!
//! This crate contains no storage and no file I/O. Everything here is plain
//! computation over owned data, so it can be exercised without a database.
//!
//! ## Key Types
//!
//! - [`Event`] - A bookable show instance (one date/venue/price combination)
//! - [`Cart`] - The in-progress selection of events and quantities
//! - [`Order`] - An immutable record of a completed checkout
//! - [`OrderNumber`] - Monotonic order identifier, rendered as `0001`
//! - [`PasswordHash`] - Salted credential digest stored in place of passwords
//!
//! ## Formats
//!
//! Seed files and the order export report are both plain text. See the
//! [`seed`] and [`export`] modules.

pub mod cart;
pub mod error;
pub mod event;
pub mod export;
pub mod order;
pub mod seed;
pub mod summary;
pub mod types;
pub mod user;
pub mod validation;

pub use cart::{Cart, CartItem, Shortfall};
pub use error::{CoreError, ValidationError};
pub use event::{Event, EventDraft, EventKey};
pub use export::{render_orders, OrderReport, EXPORT_TIMESTAMP_FORMAT};
pub use order::{parse_storage_timestamp, Order, OrderLine, STORAGE_TIMESTAMP_FORMAT};
pub use seed::{parse_seed, parse_seed_line};
pub use summary::{summarize, ShowSummary};
pub use types::{EventId, OrderNumber};
pub use user::{PasswordHash, User, UserRecord};
pub use validation::{
    check_booking_day, parse_capacity, parse_price, parse_quantity, parse_weekday,
    require_non_empty, validate_payment_code,
};
