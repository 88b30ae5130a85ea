use chrono::NaiveDate;
use phase_model::{FieldErrorKind, FieldId, FieldValue, FieldValues, PhaseDateSet, ValidationEngine};
use proptest::prelude::*;

fn field_id() -> impl Strategy<Value = FieldId> {
    prop::sample::select(FieldId::ALL.to_vec())
}

fn calendar_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn maybe_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of(calendar_date())
}

fn date_set() -> impl Strategy<Value = PhaseDateSet> {
    prop::collection::vec(maybe_date(), FieldId::COUNT).prop_map(|dates| {
        let mut set = PhaseDateSet::empty();
        for (id, date) in FieldId::ALL.into_iter().zip(dates) {
            set.set(id, date);
        }
        set
    })
}

proptest! {
    #[test]
    fn prop_null_is_always_valid(id in field_id(), others in date_set()) {
        let mut values = others.to_field_values();
        values.set(id, FieldValue::Null);

        let dates = ValidationEngine::new().validate(&values).unwrap();
        prop_assert_eq!(dates.get(id), None);
    }

    #[test]
    fn prop_invalid_text_reports_each_field_once(
        invalid in prop::sample::subsequence(FieldId::ALL.to_vec(), 1..=FieldId::COUNT),
    ) {
        let mut values = FieldValues::new();
        for id in &invalid {
            values.set(*id, "not-a-date");
        }

        let errors = ValidationEngine::new().validate(&values).unwrap_err();
        prop_assert_eq!(errors.len(), invalid.len());
        for id in &invalid {
            prop_assert_eq!(errors.get(*id), Some(&FieldErrorKind::invalid_date("not-a-date")));
        }
    }

    #[test]
    fn prop_display_format_matches_iso(date in calendar_date()) {
        let iso = FieldValue::from(date.format("%Y-%m-%d").to_string());
        let display = FieldValue::from(date.format("%d/%m/%Y").to_string());
        prop_assert_eq!(iso.to_date().unwrap(), Some(date));
        prop_assert_eq!(display.to_date().unwrap(), Some(date));
    }

    #[test]
    fn prop_json_keeps_calendar_values(set in date_set()) {
        let json = serde_json::to_string(&set).unwrap();
        let parsed: PhaseDateSet = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, set);
    }
}
