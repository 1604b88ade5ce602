//! # Box Office
//!
//! Ticket sales for a small live-show box office: browse shows, fill a
//! cart, check out, and keep a permanent order history.
//!
//! ## Overview
//!
//! The box office provides an offline, single-process library for:
//!
//! - **Inventory**: Events with a remaining-seat count and a disabled flag
//! - **Cart**: Per-session event quantities, merged on add
//! - **Checkout**: Seat deduction and order creation as one atomic unit
//! - **History**: Orders newest first, exportable as a plain-text report
//! - **Admin**: Add, edit, delete and enable/disable events
//!
//! ## Key Concepts
//!
//! - **Event**: Unique by (name, venue, date). Seats never go negative.
//! - **Order**: Immutable snapshot of the cart at checkout, numbered 1, 2, ...
//! - **Store**: The source of truth. Memory is updated only after it commits.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use boxoffice::{BoxOffice, BoxOfficeConfig};
//! use boxoffice::core::EventDraft;
//! use boxoffice::store::SqliteStore;
//!
//! fn example() -> boxoffice::Result<()> {
//!     let store = SqliteStore::open("application.db")?;
//!     let mut office = BoxOffice::open(store, BoxOfficeConfig::default())?;
//!
//!     office.login("admin", "Admin321")?;
//!     let id = office.add_event(EventDraft::new("Hamlet", "Globe", "Fri", 25.0, 100))?;
//!
//!     office.add_to_cart_checked(id, 2)?;
//!     let order = office.checkout()?;
//!     println!("order {} total ${:.2}", order.number, order.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `boxoffice::core` - Domain types (Event, Cart, Order, etc.)
//! - `boxoffice::store` - Storage abstraction, SQLite and in-memory stores

pub mod box_office;
pub mod config;
pub mod error;
pub mod export;
pub mod navigation;
pub mod session;

// Re-export component crates
pub use boxoffice_core as core;
pub use boxoffice_store as store;

// Re-export main types for convenience
pub use box_office::BoxOffice;
pub use config::{AdminConfig, BoxOfficeConfig};
pub use error::{BoxOfficeError, Result};
pub use export::write_orders;
pub use navigation::{navigate, NavAction, Navigator, Screen};
pub use session::{Role, Session};

// Re-export commonly used core types
pub use boxoffice_core::{
    Cart, CartItem, Event, EventDraft, EventId, EventKey, Order, OrderLine, OrderNumber,
    ShowSummary, User,
};
