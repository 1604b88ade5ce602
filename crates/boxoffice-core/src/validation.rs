//! Input validation: numeric form fields, payment codes and booking days.

use chrono::Weekday;

use crate::error::ValidationError;
use crate::event::Event;

/// Length of the payment confirmation code.
pub const PAYMENT_CODE_LEN: usize = 6;

/// Reject empty (or whitespace-only) text fields. Returns the trimmed value.
pub fn require_non_empty<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(trimmed)
}

/// Parse a non-negative, finite ticket price.
pub fn parse_price(value: &str) -> Result<f64, ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(invalid("price", value)),
    }
}

/// Parse a seat capacity.
pub fn parse_capacity(value: &str) -> Result<u32, ValidationError> {
    value.trim().parse::<u32>().map_err(|_| invalid("capacity", value))
}

/// Parse a cart quantity.
pub fn parse_quantity(value: &str) -> Result<u32, ValidationError> {
    value.trim().parse::<u32>().map_err(|_| invalid("quantity", value))
}

/// A payment confirmation code is exactly six ASCII digits.
pub fn validate_payment_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() == PAYMENT_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPaymentCode)
    }
}

/// Parse an event's weekday token (`Mon`, `Tue`, ...).
pub fn parse_weekday(token: &str) -> Result<Weekday, ValidationError> {
    token
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ValidationError::UnknownWeekday(token.to_string()))
}

/// Check that `event` is still bookable this week.
///
/// The week runs Monday to Sunday: an event whose day comes before `today`
/// has already happened.
pub fn check_booking_day(event: &Event, today: Weekday) -> Result<(), ValidationError> {
    let day = parse_weekday(&event.date)?;
    if day.number_from_monday() < today.number_from_monday() {
        return Err(ValidationError::DayPassed {
            event: event.name.clone(),
            day: event.date.clone(),
            today: today.to_string(),
        });
    }
    Ok(())
}

fn invalid(field: &'static str, value: &str) -> ValidationError {
    ValidationError::InvalidInput {
        field,
        value: value.to_string(),
    }
}
