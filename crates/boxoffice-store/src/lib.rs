//! # Box Office Store
//!
//! Persistence gateway for the box office. Three record-oriented surfaces
//! (users, events, orders) sit behind traits, with a SQLite implementation
//! and an in-memory one for tests.
//!
//! ## Key Types
//!
//! - [`Store`] - Umbrella trait the box office depends on
//! - [`UserStore`], [`EventStore`], [`OrderStore`] - The three surfaces
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`SeatUpdate`] - New remaining-seat value written at checkout
//!
//! ## Usage
//!
//! ```rust,no_run
//! use boxoffice_store::{EventStore, SqliteStore};
//!
//! let store = SqliteStore::open("application.db").unwrap();
//! let events = store.all_events().unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Durable before return**: every write is committed when the call returns.
//! - **Atomic checkout**: [`Store::record_checkout`] writes seat deductions and
//!   the order in one transaction.
//! - **History joins live events**: order lines are read back against the
//!   current event rows; lines for deleted events disappear.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{EventStore, OrderStore, SeatUpdate, Store, UserStore};
