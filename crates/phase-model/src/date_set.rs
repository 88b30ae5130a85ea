//! The validated phase date record
//!
//! Serializes as a flat JSON object with exactly the ten field keys, each an
//! ISO `YYYY-MM-DD` string or `null`.

use crate::field::FieldId;
use crate::value::FieldValues;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ten optional milestone dates covering one lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDateSet {
    /// Staging: cancellation
    pub cancellation_date: Option<NaiveDate>,
    /// Staging: targeted award
    pub targeted_award_date: Option<NaiveDate>,
    /// Document development phase start
    pub document_start: Option<NaiveDate>,
    /// Document development phase end
    pub document_end: Option<NaiveDate>,
    /// Market phase start
    pub market_start: Option<NaiveDate>,
    /// Market phase end
    pub market_end: Option<NaiveDate>,
    /// Evaluation phase start
    pub evaluation_start: Option<NaiveDate>,
    /// Evaluation phase end
    pub evaluation_end: Option<NaiveDate>,
    /// Award phase start
    pub award_start: Option<NaiveDate>,
    /// Award phase end
    pub award_end: Option<NaiveDate>,
}

impl PhaseDateSet {
    /// All-null record
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, id: FieldId) -> &mut Option<NaiveDate> {
        match id {
            FieldId::CancellationDate => &mut self.cancellation_date,
            FieldId::TargetedAwardDate => &mut self.targeted_award_date,
            FieldId::DocumentStart => &mut self.document_start,
            FieldId::DocumentEnd => &mut self.document_end,
            FieldId::MarketStart => &mut self.market_start,
            FieldId::MarketEnd => &mut self.market_end,
            FieldId::EvaluationStart => &mut self.evaluation_start,
            FieldId::EvaluationEnd => &mut self.evaluation_end,
            FieldId::AwardStart => &mut self.award_start,
            FieldId::AwardEnd => &mut self.award_end,
        }
    }

    /// Date of a field
    #[must_use]
    pub fn get(&self, id: FieldId) -> Option<NaiveDate> {
        match id {
            FieldId::CancellationDate => self.cancellation_date,
            FieldId::TargetedAwardDate => self.targeted_award_date,
            FieldId::DocumentStart => self.document_start,
            FieldId::DocumentEnd => self.document_end,
            FieldId::MarketStart => self.market_start,
            FieldId::MarketEnd => self.market_end,
            FieldId::EvaluationStart => self.evaluation_start,
            FieldId::EvaluationEnd => self.evaluation_end,
            FieldId::AwardStart => self.award_start,
            FieldId::AwardEnd => self.award_end,
        }
    }

    /// Set the date of a field
    #[inline]
    pub fn set(&mut self, id: FieldId, date: Option<NaiveDate>) {
        *self.slot_mut(id) = date;
    }

    /// Builder form of [`PhaseDateSet::set`]
    #[inline]
    #[must_use]
    pub fn with(mut self, id: FieldId, date: NaiveDate) -> Self {
        self.set(id, Some(date));
        self
    }

    /// Fields that carry a date, in display order
    pub fn populated(&self) -> impl Iterator<Item = (FieldId, NaiveDate)> + '_ {
        FieldId::ALL
            .into_iter()
            .filter_map(|id| self.get(id).map(|date| (id, date)))
    }

    /// Check whether every field is null
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }

    /// Convert back into raw form values
    #[must_use]
    pub fn to_field_values(&self) -> FieldValues {
        FieldId::ALL
            .into_iter()
            .fold(FieldValues::new(), |values, id| values.with(id, self.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn serializes_all_ten_keys() {
        let set = PhaseDateSet::empty().with(FieldId::DocumentStart, ymd(2025, 1, 1));
        let value = serde_json::to_value(set).unwrap();

        assert_eq!(
            value,
            json!({
                "cancellationDate": null,
                "targetedAwardDate": null,
                "documentStart": "2025-01-01",
                "documentEnd": null,
                "marketStart": null,
                "marketEnd": null,
                "evaluationStart": null,
                "evaluationEnd": null,
                "awardStart": null,
                "awardEnd": null,
            })
        );
    }

    #[test]
    fn keys_match_field_identifiers() {
        let value = serde_json::to_value(PhaseDateSet::empty()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FieldId::COUNT);
        for id in FieldId::ALL {
            assert!(object.contains_key(id.as_str()), "missing {id}");
        }
    }

    #[test]
    fn deserializes_echo_with_extra_keys() {
        let echoed = json!({ "awardStart": "2025-03-01", "id": 101 });
        let set: PhaseDateSet = serde_json::from_value(echoed).unwrap();
        assert_eq!(set.award_start, Some(ymd(2025, 3, 1)));
        assert_eq!(set.populated().count(), 1);
    }

    #[test]
    fn get_and_set_address_the_same_slot() {
        let mut set = PhaseDateSet::empty();
        for (offset, id) in FieldId::ALL.into_iter().enumerate() {
            let date = ymd(2025, 1, 1 + offset as u32);
            set.set(id, Some(date));
            assert_eq!(set.get(id), Some(date));
        }
        assert_eq!(set.populated().count(), FieldId::COUNT);
    }

    #[test]
    fn converts_to_field_values() {
        let set = PhaseDateSet::empty().with(FieldId::MarketEnd, ymd(2025, 5, 31));
        let values = set.to_field_values();
        assert_eq!(values.get(FieldId::MarketEnd).to_date(), Ok(Some(ymd(2025, 5, 31))));
        assert!(values.get(FieldId::MarketStart).is_null());
    }
}
