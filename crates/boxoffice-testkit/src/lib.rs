//! # Box Office Testkit
//!
//! Testing utilities for the box office.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A box office over an in-memory store with sample events
//! - **Generators**: Proptest strategies for events and cart operations
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use boxoffice_testkit::generators::{cart_ops, apply_ops};
//! use boxoffice_testkit::fixtures::TestFixture;
//!
//! proptest! {
//!     #[test]
//!     fn cart_never_holds_zero(ops in cart_ops(3, 20)) {
//!         let mut fixture = TestFixture::with_sample_events();
//!         apply_ops(&mut fixture.office, &fixture.event_ids, &ops);
//!         prop_assert!(fixture.office.cart().items().iter().all(|i| i.quantity > 0));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use boxoffice_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_sample_events();
//! assert_eq!(fixture.office.list_events(false).len(), 3);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{fixed_timestamp, sample_drafts, TestFixture};
pub use generators::{apply_ops, cart_ops, event_draft, CartOp};
