//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use chrono::{NaiveDate, NaiveDateTime};

use boxoffice::{BoxOffice, BoxOfficeConfig};
use boxoffice_core::{EventDraft, EventId};
use boxoffice_store::MemoryStore;

/// A box office over a memory store, plus the ids of the events it was
/// seeded with.
pub struct TestFixture {
    pub office: BoxOffice<MemoryStore>,
    pub event_ids: Vec<EventId>,
}

impl TestFixture {
    /// An empty box office.
    pub fn new() -> Self {
        Self::with_events(Vec::new())
    }

    /// A box office holding [`sample_drafts`].
    pub fn with_sample_events() -> Self {
        Self::with_events(sample_drafts())
    }

    /// A box office holding the given events, added in order.
    pub fn with_events(drafts: Vec<EventDraft>) -> Self {
        let config = BoxOfficeConfig {
            enforce_booking_days: false,
            ..BoxOfficeConfig::default()
        };
        let mut office = BoxOffice::open(MemoryStore::new(), config)
            .expect("memory store setup cannot fail");
        let event_ids = drafts
            .into_iter()
            .map(|draft| office.add_event(draft).expect("fixture events are unique"))
            .collect();
        Self { office, event_ids }
    }

    /// Total remaining seats across all events.
    pub fn total_remaining(&self) -> u64 {
        self.office
            .list_events(true)
            .iter()
            .map(|e| u64::from(e.remaining_seats))
            .sum()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Three events with distinct keys and small capacities.
pub fn sample_drafts() -> Vec<EventDraft> {
    vec![
        EventDraft::new("Hamlet", "Globe", "Fri", 20.0, 5),
        EventDraft::new("Cats", "Palladium", "Sat", 10.0, 1),
        EventDraft::new("Hamlet", "Nova", "Sun", 15.0, 2),
    ]
}

/// A fixed checkout time so orders compare equal across runs.
pub fn fixed_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .expect("valid date")
}
