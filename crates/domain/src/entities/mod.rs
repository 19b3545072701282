//! Catalog entities - the rules content characters are built from.

mod ancestry;
mod class;
mod path;
mod proficiency;
mod spell;

pub use ancestry::{Ancestry, Trait};
pub use class::{ChoiceOption, ClassDefinition, ClassFeature, FeatureChoice};
pub use path::{PathBenefits, PathDefinition, PathTier};
pub use proficiency::{AttributeSource, LanguageDefinition, SkillDefinition, TradeDefinition};
pub use spell::{Maneuver, ManeuverCategory, Spell, SpellList};
