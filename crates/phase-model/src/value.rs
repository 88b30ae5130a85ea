//! Raw field values
//!
//! A value is whatever the presentation layer reported for a field. It is
//! only interpreted as a date at validation time, so half-typed input can
//! sit in the form without failing.

use crate::error::FieldErrorKind;
use crate::field::FieldId;
use crate::schema::DISPLAY_FORMAT;
use chrono::{DateTime, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Value bound to a single field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// No value
    #[default]
    Null,
    /// Date picked from a calendar widget
    Date(NaiveDate),
    /// Text entered by hand, not yet parsed
    Text(String),
}

impl FieldValue {
    /// Check for the null value
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Interpret as an optional date
    ///
    /// # Errors
    /// Returns `FieldErrorKind::InvalidDate` when text does not parse.
    pub fn to_date(&self) -> Result<Option<NaiveDate>, FieldErrorKind> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Date(date) => Ok(Some(*date)),
            FieldValue::Text(text) => parse_date_text(text),
        }
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> Self {
        FieldValue::Date(date)
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(FieldValue::Null, FieldValue::Date)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

/// Parse entered text as a calendar date
///
/// Accepts ISO `YYYY-MM-DD`, the display format `DD/MM/YYYY`, and RFC 3339
/// timestamps. A timestamp keeps the calendar date of its own offset.
/// Blank text is a cleared field and yields `None`.
///
/// # Errors
/// Returns `FieldErrorKind::InvalidDate` for anything else.
pub fn parse_date_text(raw: &str) -> Result<Option<NaiveDate>, FieldErrorKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, ISO_FORMAT) {
        return Ok(Some(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, DISPLAY_FORMAT) {
        return Ok(Some(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(timestamp.date_naive()));
    }

    Err(FieldErrorKind::invalid_date(raw))
}

/// Total mapping from every field to its current value
///
/// Every identifier is always present; unset fields hold `FieldValue::Null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    slots: [FieldValue; FieldId::COUNT],
}

impl FieldValues {
    /// All fields null
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field
    #[inline]
    #[must_use]
    pub fn get(&self, id: FieldId) -> &FieldValue {
        &self.slots[id.index()]
    }

    /// Replace the value of a field, returning the previous one
    #[inline]
    pub fn set(&mut self, id: FieldId, value: impl Into<FieldValue>) -> FieldValue {
        std::mem::replace(&mut self.slots[id.index()], value.into())
    }

    /// Builder form of [`FieldValues::set`]
    #[inline]
    #[must_use]
    pub fn with(mut self, id: FieldId, value: impl Into<FieldValue>) -> Self {
        self.set(id, value);
        self
    }

    /// Iterate fields in display order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldValue)> {
        FieldId::ALL.into_iter().zip(self.slots.iter())
    }

    /// Check whether every field is null
    #[must_use]
    pub fn is_all_null(&self) -> bool {
        self.slots.iter().all(FieldValue::is_null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date_text("2025-01-01"), Ok(Some(ymd(2025, 1, 1))));
    }

    #[test]
    fn parses_display_format() {
        assert_eq!(parse_date_text("09/04/2025"), Ok(Some(ymd(2025, 4, 9))));
    }

    #[test]
    fn timestamp_keeps_its_own_calendar_date() {
        // 23:30 at -05:00 is already the next day in UTC
        let parsed = parse_date_text("2025-03-01T23:30:00-05:00");
        assert_eq!(parsed, Ok(Some(ymd(2025, 3, 1))));
    }

    #[test]
    fn blank_text_is_null() {
        assert_eq!(parse_date_text("   "), Ok(None));
        assert_eq!(FieldValue::from("").to_date(), Ok(None));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date_text("2025-02-30").is_err());
        assert!(parse_date_text("31/04/2025").is_err());
    }

    #[test]
    fn rejects_free_text() {
        let err = parse_date_text("not-a-date").unwrap_err();
        assert_eq!(err, FieldErrorKind::invalid_date("not-a-date"));
    }

    #[test]
    fn set_returns_previous_value() {
        let mut values = FieldValues::new();
        let previous = values.set(FieldId::AwardEnd, ymd(2025, 6, 30));
        assert!(previous.is_null());
        assert_eq!(values.get(FieldId::AwardEnd), &FieldValue::Date(ymd(2025, 6, 30)));
        assert!(!values.is_all_null());
    }
}
