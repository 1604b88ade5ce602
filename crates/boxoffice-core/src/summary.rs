//! Show summaries for the admin view: events grouped by title.

use crate::event::Event;

/// One show title and each of its date/venue options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSummary {
    pub title: String,
    /// Lines such as `Mon – Theatre Nova`.
    pub options: Vec<String>,
}

impl ShowSummary {
    /// Options joined one per line.
    pub fn options_text(&self) -> String {
        self.options.join("\n")
    }
}

/// Group events by name.
///
/// Groups appear in order of first appearance; within a group the input
/// order is kept.
pub fn summarize<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<ShowSummary> {
    let mut summaries: Vec<ShowSummary> = Vec::new();
    for event in events {
        let option = format!("{} – {}", event.date, event.venue);
        match summaries.iter_mut().find(|s| s.title == event.name) {
            Some(summary) => summary.options.push(option),
            None => summaries.push(ShowSummary {
                title: event.name.clone(),
                options: vec![option],
            }),
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventId;

    fn event(id: i64, name: &str, date: &str, venue: &str) -> Event {
        Event {
            id: EventId(id),
            name: name.into(),
            date: date.into(),
            venue: venue.into(),
            price: 10.0,
            remaining_seats: 10,
            disabled: false,
        }
    }

    #[test]
    fn test_groups_by_name_preserving_order() {
        let events = vec![
            event(1, "Hamlet", "Mon", "Globe"),
            event(2, "Macbeth", "Tue", "Rose"),
            event(3, "Hamlet", "Fri", "Swan"),
        ];
        let summaries = summarize(&events);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Hamlet");
        assert_eq!(summaries[0].options, vec!["Mon – Globe", "Fri – Swan"]);
        assert_eq!(summaries[0].options_text(), "Mon – Globe\nFri – Swan");
        assert_eq!(summaries[1].title, "Macbeth");
    }

    #[test]
    fn test_empty() {
        assert!(summarize(&Vec::<Event>::new()).is_empty());
    }
}
