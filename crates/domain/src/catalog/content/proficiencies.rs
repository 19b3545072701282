//! Built-in skills, trades and languages.

use crate::entities::{AttributeSource, LanguageDefinition, SkillDefinition, TradeDefinition};
use crate::value_objects::Attribute;

use AttributeSource::{Fixed, Prime};

pub(super) fn skills() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition::new("awareness", "Awareness", Prime),
        SkillDefinition::new("athletics", "Athletics", Fixed(Attribute::Might)),
        SkillDefinition::new("intimidation", "Intimidation", Fixed(Attribute::Might)),
        SkillDefinition::new("acrobatics", "Acrobatics", Fixed(Attribute::Agility)),
        SkillDefinition::new("trickery", "Trickery", Fixed(Attribute::Agility)),
        SkillDefinition::new("stealth", "Stealth", Fixed(Attribute::Agility)),
        SkillDefinition::new("animal", "Animal", Fixed(Attribute::Charisma)),
        SkillDefinition::new("influence", "Influence", Fixed(Attribute::Charisma)),
        SkillDefinition::new("insight", "Insight", Fixed(Attribute::Charisma)),
        SkillDefinition::new("investigation", "Investigation", Fixed(Attribute::Intelligence)),
        SkillDefinition::new("medicine", "Medicine", Fixed(Attribute::Intelligence)),
        SkillDefinition::new("survival", "Survival", Fixed(Attribute::Intelligence)),
    ]
}

pub(super) fn trades() -> Vec<TradeDefinition> {
    vec![
        // Knowledge trades
        TradeDefinition::new("arcana", "Arcana", Fixed(Attribute::Intelligence)),
        TradeDefinition::new("history", "History", Fixed(Attribute::Intelligence)),
        TradeDefinition::new("nature", "Nature", Fixed(Attribute::Intelligence)),
        TradeDefinition::new("occultism", "Occultism", Fixed(Attribute::Intelligence)),
        TradeDefinition::new("religion", "Religion", Fixed(Attribute::Intelligence)),
        // Crafting and practical trades
        TradeDefinition::new("alchemy", "Alchemy", Fixed(Attribute::Intelligence))
            .with_tools("Alchemist's Supplies"),
        TradeDefinition::new("blacksmithing", "Blacksmithing", Fixed(Attribute::Might))
            .with_tools("Blacksmith's Tools"),
        TradeDefinition::new("carpentry", "Carpentry", Fixed(Attribute::Might))
            .with_tools("Carpenter's Tools"),
        TradeDefinition::new("cartography", "Cartography", Fixed(Attribute::Intelligence))
            .with_tools("Cartographer's Tools"),
        TradeDefinition::new("jeweler", "Jeweler", Fixed(Attribute::Agility))
            .with_tools("Jeweler's Tools"),
        TradeDefinition::new("lockpicking", "Lockpicking", Fixed(Attribute::Agility))
            .with_tools("Thieves' Tools"),
        TradeDefinition::new("musician", "Musician", Fixed(Attribute::Charisma))
            .with_tools("Musical Instrument"),
    ]
}

pub(super) fn languages() -> Vec<LanguageDefinition> {
    vec![
        LanguageDefinition::default_fluent("common", "Common"),
        LanguageDefinition::new("human", "Human"),
        LanguageDefinition::new("dwarvish", "Dwarvish"),
        LanguageDefinition::new("elvish", "Elvish"),
        LanguageDefinition::new("gnomish", "Gnomish"),
        LanguageDefinition::new("halfling", "Halfling"),
        LanguageDefinition::new("orcish", "Orcish"),
        LanguageDefinition::new("giant", "Giant"),
    ]
}
