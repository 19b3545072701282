//! Sheetsmith domain: rules content, selections and the derived character sheet.
//!
//! Pure data and pure functions. No logging and no I/O beyond parsing strings;
//! the engine crate orchestrates validation and derivation on top of this.

pub mod catalog;
pub mod character_sheet;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use catalog::{
    builtin_document, migrate_v1_to_v2, CatalogDocument, CatalogError, RulesCatalog,
    CURRENT_CATALOG_VERSION,
};

pub use character_sheet::{
    AbilityEntry, Capabilities, CheckScores, DefenseScore, Defenses, DerivedCharacterSheet,
    KnownLimits, LanguageEntry, MovementEntry, PoolSummary, Proficiencies, ProficiencyScore,
    ProficiencySummary, Progression, Repertoire, ResistanceEntry, ResourcePool, Resources,
    SaveScore, SenseEntry, SheetIdentity,
};

pub use entities::{
    Ancestry, AttributeSource, ChoiceOption, ClassDefinition, ClassFeature, FeatureChoice,
    LanguageDefinition, Maneuver, ManeuverCategory, PathBenefits, PathDefinition, PathTier,
    SkillDefinition, Spell, SpellList, TradeDefinition, Trait,
};

pub use error::{CatalogKind, ErrorKind, FeatureChoiceProblem, RulesError};

pub use ids::{
    AncestryId, CharacterId, ChoiceId, ClassId, FeatureId, LanguageId, ManeuverId, OptionId,
    PathId, SkillId, SpellId, TradeId, TraitId,
};

pub use value_objects::{
    AncestryContext, Attribute, AttributeSet, Capability, ChoiceValue, ConditionalEffect,
    CreationRules, DamageType, Effect, EffectCondition, EffectDeclaration, EntryRef, Fluency,
    MovementMode, MovementSpeed, PathProgressionState, ProficiencyConversionState,
    ProficiencyPool, ProficiencySelections, ResistanceAmount, SaveTarget, Sense, SheetStat,
    Submission,
};
