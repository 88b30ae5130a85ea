//! Static field schema
//!
//! Single source of truth for labels, sections and value types.
//! Rows are kept in [`FieldId::ALL`] order so lookups index directly.

use crate::field::{FieldId, Section};

/// Date format shown to users, `DD/MM/YYYY`
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Value type a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Nullable calendar date
    OptionalDate,
}

/// Declaration of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Stable identifier
    pub id: FieldId,
    /// Human-readable label
    pub label: &'static str,
    /// Owning section
    pub section: Section,
    /// Accepted value type
    pub value_type: ValueType,
}

impl FieldDescriptor {
    const fn date(id: FieldId, label: &'static str, section: Section) -> Self {
        Self {
            id,
            label,
            section,
            value_type: ValueType::OptionalDate,
        }
    }

    /// Tooltip text attached to the field label
    #[must_use]
    pub fn help_text(&self) -> String {
        format!("More info about {}", self.label)
    }
}

static FIELDS: [FieldDescriptor; FieldId::COUNT] = [
    FieldDescriptor::date(FieldId::CancellationDate, "Cancellation Date", Section::Staging),
    FieldDescriptor::date(FieldId::TargetedAwardDate, "Targeted Award Date", Section::Staging),
    FieldDescriptor::date(
        FieldId::DocumentStart,
        "Document Development Phase Start Date",
        Section::DocumentDevelopment,
    ),
    FieldDescriptor::date(
        FieldId::DocumentEnd,
        "Document Development Phase End Date",
        Section::DocumentDevelopment,
    ),
    FieldDescriptor::date(FieldId::MarketStart, "Market Phase Start Date", Section::Market),
    FieldDescriptor::date(FieldId::MarketEnd, "Market Phase End Date", Section::Market),
    FieldDescriptor::date(
        FieldId::EvaluationStart,
        "Evaluation Phase Start Date",
        Section::Evaluation,
    ),
    FieldDescriptor::date(
        FieldId::EvaluationEnd,
        "Evaluation Phase End Date",
        Section::Evaluation,
    ),
    FieldDescriptor::date(FieldId::AwardStart, "Award Phase Start Date", Section::Award),
    FieldDescriptor::date(FieldId::AwardEnd, "Award Phase End Date", Section::Award),
];

/// Access to the static field schema
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSchema;

impl FieldSchema {
    /// All fields in display order
    #[inline]
    #[must_use]
    pub fn fields() -> &'static [FieldDescriptor] {
        &FIELDS
    }

    /// Descriptor for a field
    #[inline]
    #[must_use]
    pub fn descriptor(id: FieldId) -> &'static FieldDescriptor {
        &FIELDS[id.index()]
    }

    /// Sections in display order, each with its fields
    pub fn sections() -> impl Iterator<Item = (Section, Vec<&'static FieldDescriptor>)> {
        Section::ALL.into_iter().map(|section| {
            let fields = FIELDS.iter().filter(|f| f.section == section).collect();
            (section, fields)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_follow_identifier_order() {
        let ids: Vec<FieldId> = FieldSchema::fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, FieldId::ALL.to_vec());
    }

    #[test]
    fn row_sections_agree_with_identifiers() {
        for field in FieldSchema::fields() {
            assert_eq!(field.section, field.id.section());
        }
    }

    #[test]
    fn every_field_is_an_optional_date() {
        assert!(FieldSchema::fields()
            .iter()
            .all(|f| f.value_type == ValueType::OptionalDate));
    }

    #[test]
    fn sections_group_fields() {
        let sections: Vec<(&str, Vec<&str>)> = FieldSchema::sections()
            .map(|(s, fields)| (s.title(), fields.iter().map(|f| f.label).collect()))
            .collect();

        assert_eq!(sections.len(), 5);
        assert_eq!(
            sections[0],
            ("Staging", vec!["Cancellation Date", "Targeted Award Date"])
        );
        assert_eq!(
            sections[4],
            (
                "Award Phase",
                vec!["Award Phase Start Date", "Award Phase End Date"]
            )
        );
    }

    #[test]
    fn help_text_names_the_label() {
        let field = FieldSchema::descriptor(FieldId::MarketEnd);
        assert_eq!(field.help_text(), "More info about Market Phase End Date");
    }
}
