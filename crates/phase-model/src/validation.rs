//! Submit-time validation
//!
//! Table-driven over the field schema: each row's value type names the rule
//! its value must satisfy. Every field is checked, so a single pass reports
//! every offending field.

use crate::date_set::PhaseDateSet;
use crate::error::FieldErrorKind;
use crate::field::FieldId;
use crate::schema::{FieldSchema, ValueType};
use crate::value::{FieldValue, FieldValues};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-field validation failures, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FieldId, FieldErrorKind>);

impl FieldErrors {
    /// Error recorded for a field
    #[inline]
    #[must_use]
    pub fn get(&self, id: FieldId) -> Option<&FieldErrorKind> {
        self.0.get(&id)
    }

    /// Number of offending fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check for no errors
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offending fields in display order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldErrorKind)> {
        self.0.iter().map(|(id, kind)| (*id, kind))
    }

    fn insert(&mut self, id: FieldId, kind: FieldErrorKind) {
        self.0.insert(id, kind);
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(FieldId::as_str).collect();
        write!(f, "{} invalid field(s): {}", self.len(), fields.join(", "))
    }
}

/// Validator for the phase form values
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate all fields
    ///
    /// # Returns
    /// - `Ok(PhaseDateSet)` when every value is null or a date
    /// - `Err(FieldErrors)` with one entry per offending field
    ///
    /// # Errors
    /// See above; no range, ordering or required-field rules apply.
    pub fn validate(&self, values: &FieldValues) -> Result<PhaseDateSet, FieldErrors> {
        let mut dates = PhaseDateSet::empty();
        let mut errors = FieldErrors::default();

        for field in FieldSchema::fields() {
            match Self::check(field.value_type, values.get(field.id)) {
                Ok(date) => dates.set(field.id, date),
                Err(kind) => errors.insert(field.id, kind),
            }
        }

        if errors.is_empty() {
            Ok(dates)
        } else {
            Err(errors)
        }
    }

    /// Validate a single field
    ///
    /// # Errors
    /// Returns the field's error kind when its value breaks the rule.
    pub fn validate_field(
        &self,
        id: FieldId,
        value: &FieldValue,
    ) -> Result<Option<NaiveDate>, FieldErrorKind> {
        Self::check(FieldSchema::descriptor(id).value_type, value)
    }

    fn check(
        value_type: ValueType,
        value: &FieldValue,
    ) -> Result<Option<NaiveDate>, FieldErrorKind> {
        match value_type {
            ValueType::OptionalDate => value.to_date(),
        }
    }
}
