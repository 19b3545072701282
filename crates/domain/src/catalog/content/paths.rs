//! Built-in progression paths.

use crate::entities::{PathBenefits, PathDefinition};

pub(super) fn paths() -> Vec<PathDefinition> {
    vec![
        PathDefinition::new("martial_path", "Martial Path")
            .with_tier(1, PathBenefits::martial(1, 1, 1))
            .with_tier(2, PathBenefits::martial(1, 1, 0))
            .with_tier(3, PathBenefits::martial(1, 1, 1))
            .with_tier(4, PathBenefits::martial(1, 1, 0)),
        PathDefinition::new("spellcaster_path", "Spellcaster Path")
            .with_tier(1, PathBenefits::spellcaster(2, 1, 1))
            .with_tier(2, PathBenefits::spellcaster(2, 1, 0))
            .with_tier(3, PathBenefits::spellcaster(2, 0, 1))
            .with_tier(4, PathBenefits::spellcaster(2, 1, 1)),
    ]
}
