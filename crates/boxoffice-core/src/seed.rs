//! Seed file parsing.
//!
//! One event per line, semicolon separated:
//!
//! ```text
//! name;venue;day;price;sold;capacity
//! ```
//!
//! Remaining seats are `capacity - sold`. Blank lines are skipped.

use crate::error::ValidationError;
use crate::event::EventDraft;

/// Parse a whole seed file.
pub fn parse_seed(text: &str) -> Result<Vec<EventDraft>, ValidationError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_seed_line(i + 1, line))
        .collect()
}

/// Parse a single seed line. `line_no` is 1-based and only used in errors.
pub fn parse_seed_line(line_no: usize, line: &str) -> Result<EventDraft, ValidationError> {
    let malformed = |reason: String| ValidationError::MalformedSeedLine {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    let [name, venue, day, price, sold, capacity] = fields[..] else {
        return Err(malformed(format!("expected 6 fields, got {}", fields.len())));
    };

    let price: f64 = price
        .parse()
        .ok()
        .filter(|p: &f64| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| malformed(format!("bad price {price:?}")))?;
    let sold: u32 = sold
        .parse()
        .map_err(|_| malformed(format!("bad sold count {sold:?}")))?;
    let capacity: u32 = capacity
        .parse()
        .map_err(|_| malformed(format!("bad capacity {capacity:?}")))?;
    let remaining = capacity
        .checked_sub(sold)
        .ok_or_else(|| malformed(format!("sold {sold} exceeds capacity {capacity}")))?;

    Ok(EventDraft::new(name, venue, day, price, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_file() {
        let text = "Hamlet;Globe;Fri;25.0;10;100\n\nMacbeth;Rose;Sat;15.5;0;40\n";
        let drafts = parse_seed(text).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Hamlet");
        assert_eq!(drafts[0].venue, "Globe");
        assert_eq!(drafts[0].date, "Fri");
        assert_eq!(drafts[0].remaining_seats, 90);
        assert_eq!(drafts[1].price, 15.5);
        assert_eq!(drafts[1].remaining_seats, 40);
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = parse_seed("Hamlet;Globe;Fri;25.0;10;100\nbroken;line").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedSeedLine { line: 2, .. }));
    }

    #[test]
    fn test_oversold_is_rejected() {
        let err = parse_seed_line(1, "Hamlet;Globe;Fri;25.0;101;100").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedSeedLine { line: 1, .. }));
    }
}
