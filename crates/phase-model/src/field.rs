//! Field identifiers and sections
//!
//! Identifiers serialize to the stable camelCase keys the backend expects.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable identifier of one of the ten milestone fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    /// Staging: cancellation
    CancellationDate,
    /// Staging: targeted award
    TargetedAwardDate,
    /// Document development phase start
    DocumentStart,
    /// Document development phase end
    DocumentEnd,
    /// Market phase start
    MarketStart,
    /// Market phase end
    MarketEnd,
    /// Evaluation phase start
    EvaluationStart,
    /// Evaluation phase end
    EvaluationEnd,
    /// Award phase start
    AwardStart,
    /// Award phase end
    AwardEnd,
}

impl FieldId {
    /// Number of fields
    pub const COUNT: usize = 10;

    /// All fields in display order
    pub const ALL: [FieldId; Self::COUNT] = [
        FieldId::CancellationDate,
        FieldId::TargetedAwardDate,
        FieldId::DocumentStart,
        FieldId::DocumentEnd,
        FieldId::MarketStart,
        FieldId::MarketEnd,
        FieldId::EvaluationStart,
        FieldId::EvaluationEnd,
        FieldId::AwardStart,
        FieldId::AwardEnd,
    ];

    /// Wire identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::CancellationDate => "cancellationDate",
            FieldId::TargetedAwardDate => "targetedAwardDate",
            FieldId::DocumentStart => "documentStart",
            FieldId::DocumentEnd => "documentEnd",
            FieldId::MarketStart => "marketStart",
            FieldId::MarketEnd => "marketEnd",
            FieldId::EvaluationStart => "evaluationStart",
            FieldId::EvaluationEnd => "evaluationEnd",
            FieldId::AwardStart => "awardStart",
            FieldId::AwardEnd => "awardEnd",
        }
    }

    /// Position in [`FieldId::ALL`]
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Section owning this field
    #[must_use]
    pub fn section(&self) -> Section {
        match self {
            FieldId::CancellationDate | FieldId::TargetedAwardDate => Section::Staging,
            FieldId::DocumentStart | FieldId::DocumentEnd => Section::DocumentDevelopment,
            FieldId::MarketStart | FieldId::MarketEnd => Section::Market,
            FieldId::EvaluationStart | FieldId::EvaluationEnd => Section::Evaluation,
            FieldId::AwardStart | FieldId::AwardEnd => Section::Award,
        }
    }
}

impl FromStr for FieldId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation grouping of related fields
///
/// Sections carry no validation meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Staging
    Staging,
    /// Document Development Phase
    DocumentDevelopment,
    /// Market Phase
    Market,
    /// Evaluation Phase
    Evaluation,
    /// Award Phase
    Award,
}

impl Section {
    /// All sections in display order
    pub const ALL: [Section; 5] = [
        Section::Staging,
        Section::DocumentDevelopment,
        Section::Market,
        Section::Evaluation,
        Section::Award,
    ];

    /// Heading shown above the section
    #[inline]
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Section::Staging => "Staging",
            Section::DocumentDevelopment => "Document Development Phase",
            Section::Market => "Market Phase",
            Section::Evaluation => "Evaluation Phase",
            Section::Award => "Award Phase",
        }
    }

    /// Fields of this section in display order
    pub fn fields(self) -> impl Iterator<Item = FieldId> {
        FieldId::ALL.into_iter().filter(move |id| id.section() == self)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
