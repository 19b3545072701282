//! Use cases - the rules computations.
//!
//! Each module is a pure function of its inputs and the read-only catalog.

pub mod character_sheet;
pub mod effects;
pub mod path_progression;
pub mod proficiency;
pub mod validation;

pub use character_sheet::{derive_character_sheet, derive_from_accepted};
pub use effects::{resolve_effects, AggregateEffects, AppliedEffect};
pub use path_progression::{calculate_total_path_benefits, validate_path_state};
pub use proficiency::{ProficiencyBudget, CONVERSION_RATE};
pub use validation::{
    check_attribute_cap, check_attributes, AcceptedSubmission, Rejection, SubmissionValidator,
    ValidationStage,
};
