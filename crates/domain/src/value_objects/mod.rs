//! Value objects for the rules core.

mod attribute;
mod creation_rules;
mod effect;
mod proficiency;
mod selection;
mod sheet_stat;

pub use attribute::{Attribute, AttributeSet};
pub use creation_rules::CreationRules;
pub use effect::{
    Capability, ConditionalEffect, DamageType, Effect, EffectCondition, EffectDeclaration,
    MovementMode, MovementSpeed, ResistanceAmount, SaveTarget, Sense,
};
pub use proficiency::{Fluency, ProficiencyConversionState, ProficiencyPool};
pub use selection::{
    AncestryContext, ChoiceValue, EntryRef, PathProgressionState, ProficiencySelections,
    Submission,
};
pub use sheet_stat::SheetStat;
