//! Unified error types for the rules core
//!
//! Every failure here is a deterministic function of the input: nothing is
//! retried, and callers surface the kind plus the message to the user.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::ids::{AncestryId, PathId, SpellId, TraitId};
use crate::value_objects::{Attribute, ProficiencyPool};

/// Which table of the rules catalog an id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Ancestry,
    Trait,
    Class,
    Feature,
    Choice,
    Option,
    Path,
    Skill,
    Trade,
    Language,
    Spell,
    Maneuver,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ancestry => "ancestry",
            Self::Trait => "trait",
            Self::Class => "class",
            Self::Feature => "feature",
            Self::Choice => "choice",
            Self::Option => "option",
            Self::Path => "path",
            Self::Skill => "skill",
            Self::Trade => "trade",
            Self::Language => "language",
            Self::Spell => "spell",
            Self::Maneuver => "maneuver",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is wrong with a class feature choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureChoiceProblem {
    /// No entry for the choice in the submission
    Missing,
    /// The selected value is not one of the catalog's options
    InvalidOption(String),
    /// Multi-select answered with the wrong number of options
    WrongCount { expected: u8, actual: usize },
    /// The same option was picked twice in one multi-select
    RepeatedOption(String),
}

impl fmt::Display for FeatureChoiceProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no selection was made"),
            Self::InvalidOption(option) => write!(f, "'{}' is not a valid option", option),
            Self::WrongCount { expected, actual } => {
                write!(f, "expected {} selection(s), got {}", expected, actual)
            }
            Self::RepeatedOption(option) => write!(f, "'{}' was selected more than once", option),
        }
    }
}

/// Error raised while validating or deriving a character.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RulesError {
    #[error("Unknown {kind} id: {id}")]
    UnknownCatalogId { kind: CatalogKind, id: String },

    #[error("Attribute points spent ({spent}) must equal the budget of {budget}")]
    PointBudget { spent: i32, budget: i32 },

    #[error("{attribute} must be between {min} and {max} before modifiers, got {value}")]
    AttributeRange {
        attribute: Attribute,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("{attribute} would be {value} after trait modifiers, above the cap of {cap}")]
    AttributeCapExceeded {
        attribute: Attribute,
        value: i32,
        cap: i32,
    },

    #[error("Ancestry '{ancestry_id}' was selected more than once")]
    DuplicateAncestry { ancestry_id: AncestryId },

    #[error("{prompt}: {problem}")]
    InvalidFeatureChoice {
        prompt: String,
        problem: FeatureChoiceProblem,
    },

    #[error("Inconsistent conversion state: {0}")]
    InconsistentConversionState(String),

    #[error("Malformed selection: {0}")]
    MalformedSelectionFormat(String),

    #[error("Ancestry points spent ({spent}) exceed the budget of {budget}")]
    AncestryPointsExceeded { spent: i32, budget: i32 },

    #[error("Trait '{trait_id}' is not available: {reason}")]
    TraitNotAvailable { trait_id: TraitId, reason: String },

    #[error("Path '{path_id}' has {invested} points invested but only {max_tier} tiers")]
    PathPointsExceeded {
        path_id: PathId,
        invested: u32,
        max_tier: u32,
    },

    #[error("Not enough {pool} points: need {required}, {remaining} remaining")]
    ProficiencyBudgetExceeded {
        pool: ProficiencyPool,
        required: i32,
        remaining: i32,
    },

    #[error("Invalid proficiency selection: {0}")]
    InvalidProficiencySelection(String),

    #[error("Too many {category} selected: {selected} of {allowed} allowed")]
    SelectionLimitExceeded {
        category: &'static str,
        selected: usize,
        allowed: i32,
    },

    #[error("Spell '{spell_id}' cannot be selected: {reason}")]
    InvalidSpellSelection { spell_id: SpellId, reason: String },
}

/// Stable error codes reported to the submitting collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    UnknownCatalogId,
    PointBudgetError,
    AttributeRangeError,
    AttributeCapExceededError,
    DuplicateAncestryError,
    InvalidFeatureChoiceError,
    InconsistentConversionState,
    MalformedSelectionFormat,
    AncestryPointsError,
    TraitNotAvailable,
    PathPointsError,
    ProficiencyBudgetError,
    InvalidProficiencySelection,
    SelectionLimitError,
    InvalidSpellSelection,
}

impl RulesError {
    /// Create an unknown-id error for a catalog lookup
    pub fn unknown(kind: CatalogKind, id: impl Into<String>) -> Self {
        Self::UnknownCatalogId {
            kind,
            id: id.into(),
        }
    }

    /// Create a malformed selection error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSelectionFormat(msg.into())
    }

    /// Create an inconsistent conversion state error
    pub fn inconsistent_conversion(msg: impl Into<String>) -> Self {
        Self::InconsistentConversionState(msg.into())
    }

    /// Create a feature choice error naming the choice's prompt
    pub fn feature_choice(prompt: impl Into<String>, problem: FeatureChoiceProblem) -> Self {
        Self::InvalidFeatureChoice {
            prompt: prompt.into(),
            problem,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCatalogId { .. } => ErrorKind::UnknownCatalogId,
            Self::PointBudget { .. } => ErrorKind::PointBudgetError,
            Self::AttributeRange { .. } => ErrorKind::AttributeRangeError,
            Self::AttributeCapExceeded { .. } => ErrorKind::AttributeCapExceededError,
            Self::DuplicateAncestry { .. } => ErrorKind::DuplicateAncestryError,
            Self::InvalidFeatureChoice { .. } => ErrorKind::InvalidFeatureChoiceError,
            Self::InconsistentConversionState(_) => ErrorKind::InconsistentConversionState,
            Self::MalformedSelectionFormat(_) => ErrorKind::MalformedSelectionFormat,
            Self::AncestryPointsExceeded { .. } => ErrorKind::AncestryPointsError,
            Self::TraitNotAvailable { .. } => ErrorKind::TraitNotAvailable,
            Self::PathPointsExceeded { .. } => ErrorKind::PathPointsError,
            Self::ProficiencyBudgetExceeded { .. } => ErrorKind::ProficiencyBudgetError,
            Self::InvalidProficiencySelection(_) => ErrorKind::InvalidProficiencySelection,
            Self::SelectionLimitExceeded { .. } => ErrorKind::SelectionLimitError,
            Self::InvalidSpellSelection { .. } => ErrorKind::InvalidSpellSelection,
        }
    }
}

impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSelectionFormat(err.to_string())
    }
}
