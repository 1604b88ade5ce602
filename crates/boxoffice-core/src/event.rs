//! Event: a bookable show instance.
//!
//! An event is one (name, venue, date) combination with a price and a
//! remaining seat count. Two events with the same [`EventKey`] may not
//! coexist.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::types::EventId;
use crate::validation::{parse_capacity, parse_price, require_non_empty};

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Short weekday token such as `Mon`.
    pub date: String,
    pub venue: String,
    pub price: f64,
    pub remaining_seats: u32,
    /// Admin-controlled; disabled events are hidden from regular users.
    pub disabled: bool,
}

impl Event {
    /// Materialize a draft once persistence has assigned it an id.
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            name: draft.name,
            date: draft.date,
            venue: draft.venue,
            price: draft.price,
            remaining_seats: draft.remaining_seats,
            disabled: draft.disabled,
        }
    }

    /// The uniqueness key of this event.
    pub fn key(&self) -> EventKey {
        EventKey::new(&self.name, &self.venue, &self.date)
    }

    /// Whether this event shares its (name, venue, date) with `other`.
    pub fn same_key(&self, other: &EventKey) -> bool {
        self.name == other.name && self.venue == other.venue && self.date == other.date
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// An event that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub venue: String,
    pub price: f64,
    pub remaining_seats: u32,
    pub disabled: bool,
}

impl EventDraft {
    /// Create an enabled draft.
    pub fn new(
        name: impl Into<String>,
        venue: impl Into<String>,
        date: impl Into<String>,
        price: f64,
        remaining_seats: u32,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            venue: venue.into(),
            price,
            remaining_seats,
            disabled: false,
        }
    }

    /// Build a draft from raw form fields.
    ///
    /// Price and capacity must be numeric; name, venue and date must be
    /// non-empty.
    pub fn parse(
        name: &str,
        venue: &str,
        date: &str,
        price: &str,
        capacity: &str,
    ) -> Result<Self, ValidationError> {
        let name = require_non_empty("name", name)?;
        let venue = require_non_empty("venue", venue)?;
        let date = require_non_empty("date", date)?;
        let price = parse_price(price)?;
        let capacity = parse_capacity(capacity)?;
        Ok(Self::new(name, venue, date, price, capacity))
    }

    /// Mark the draft as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn key(&self) -> EventKey {
        EventKey::new(&self.name, &self.venue, &self.date)
    }
}

/// The (name, venue, date) triple that identifies an event for duplicate
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKey {
    pub name: String,
    pub venue: String,
    pub date: String,
}

impl EventKey {
    pub fn new(name: &str, venue: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            venue: venue.to_string(),
            date: date.to_string(),
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} on {}", self.name, self.venue, self.date)
    }
}
