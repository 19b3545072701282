//! Built-in ancestries and their traits.

use crate::entities::{Ancestry, Trait};
use crate::value_objects::{
    Attribute, DamageType, Effect, EffectCondition, EffectDeclaration, MovementMode,
    MovementSpeed, ResistanceAmount, SaveTarget, Sense, SheetStat,
};

pub(super) fn ancestries() -> Vec<Ancestry> {
    vec![
        Ancestry::new("human", "Human")
            .with_description("Adaptable and driven, humans are found in every corner of the world."),
        Ancestry::new("elf", "Elf")
            .with_description("Long-lived and graceful, attuned to the wilds and old magic."),
        Ancestry::new("dwarf", "Dwarf")
            .with_description("Stout folk of the deep halls, hard as the stone they carve.")
            .with_effects(vec![darkvision(10)]),
        Ancestry::new("orc", "Orc")
            .with_description("Fierce and enduring, orcs prize strength and loyalty.")
            .with_effects(vec![darkvision(10)]),
        Ancestry::new("halfling", "Halfling")
            .with_description("Small, quick and hard to rattle."),
    ]
}

pub(super) fn traits() -> Vec<Trait> {
    vec![
        // Human
        Trait::new("human_attribute_increase", "human", "Attribute Increase", 2)
            .with_description("Increase your Might by 1.")
            .with_effect(EffectDeclaration::attribute(Attribute::Might, 1)),
        Trait::new("human_skill_expertise", "human", "Skill Expertise", 2)
            .with_description("You gain 1 additional skill point.")
            .with_effect(EffectDeclaration::stat(SheetStat::SkillPoints, 1)),
        Trait::new("human_trade_expertise", "human", "Trade Expertise", 1)
            .with_description("You gain 2 additional trade points.")
            .with_effect(EffectDeclaration::stat(SheetStat::TradePoints, 2)),
        Trait::new("human_determination", "human", "Human Determination", 1)
            .with_effect(EffectDeclaration::ability(
                "Human Determination",
                "Once per combat, reroll a failed check and keep the new result.",
            )),
        Trait::new("human_unstable", "human", "Unstable", -1)
            .with_description("Your Grit Points are reduced by 1.")
            .with_effect(EffectDeclaration::stat(SheetStat::GritPoints, -1)),
        // Elf
        Trait::new("elf_agile_explorer", "elf", "Agile Explorer", 2)
            .with_effect(EffectDeclaration::attribute(Attribute::Agility, 1)),
        Trait::new("elf_quick_reactions", "elf", "Quick Reactions", 1)
            .with_effect(EffectDeclaration::stat(SheetStat::PrecisionDefense, 1)),
        Trait::new("elf_elven_will", "elf", "Elven Will", 1).with_effect(EffectDeclaration::new(
            Effect::GrantAdvantageOnSave {
                save: SaveTarget::Charmed,
            },
        )),
        Trait::new("elf_fleet_of_foot", "elf", "Fleet of Foot", 1)
            .with_effect(EffectDeclaration::stat(SheetStat::MoveSpeed, 1)),
        Trait::new("elf_sunlight_sensitivity", "elf", "Sunlight Sensitivity", -1).with_effect(
            EffectDeclaration::stat(SheetStat::PrecisionDefense, -1)
                .when(EffectCondition::InBrightLight),
        ),
        Trait::new("elf_frail", "elf", "Frail", -1)
            .with_effect(EffectDeclaration::stat(SheetStat::HitPoints, -2)),
        // Dwarf
        Trait::new("dwarf_strong", "dwarf", "Dwarven Strength", 2)
            .with_effect(EffectDeclaration::attribute(Attribute::Might, 1)),
        Trait::new("dwarf_toughness", "dwarf", "Dwarven Toughness", 1)
            .with_effect(EffectDeclaration::stat(SheetStat::HitPoints, 1)),
        Trait::new("dwarf_resilience", "dwarf", "Dwarven Resilience", 1)
            .with_effect(EffectDeclaration::new(Effect::GrantResistance {
                damage: DamageType::Poison,
                amount: ResistanceAmount::Half,
            }))
            .with_effect(EffectDeclaration::new(Effect::GrantAdvantageOnSave {
                save: SaveTarget::Poisoned,
            })),
        Trait::new("dwarf_tremorsense", "dwarf", "Earthen Knowledge", 2).with_effect(
            EffectDeclaration::new(Effect::GrantSense {
                sense: Sense::Tremorsense,
                range: 3,
            }),
        ),
        Trait::new("dwarf_short_legged", "dwarf", "Short-Legged", -1)
            .with_effect(EffectDeclaration::stat(SheetStat::MoveSpeed, -1)),
        // Orc
        Trait::new("orc_powerful_build", "orc", "Powerful Build", 2)
            .with_effect(EffectDeclaration::attribute(Attribute::Might, 1)),
        Trait::new("orc_tough", "orc", "Orcish Resolve", 1)
            .with_effect(EffectDeclaration::stat(SheetStat::HitPoints, 1)),
        Trait::new("orc_rage_hardened", "orc", "Rage Hardened", 1).with_effect(
            EffectDeclaration::stat(SheetStat::AreaDefense, 1).when(EffectCondition::WhileRaging),
        ),
        Trait::new("orc_intimidating", "orc", "Intimidating Presence", 1).with_effect(
            EffectDeclaration::ability(
                "Intimidating Presence",
                "You have advantage on Intimidation checks against creatures smaller than you.",
            ),
        ),
        Trait::new("orc_reckless", "orc", "Reckless", -1)
            .with_effect(EffectDeclaration::stat(SheetStat::PrecisionDefense, -1)),
        // Halfling
        Trait::new("halfling_nimble", "halfling", "Halfling Nimbleness", 2)
            .with_effect(EffectDeclaration::attribute(Attribute::Agility, 1)),
        Trait::new("halfling_bravery", "halfling", "Brave", 1).with_effect(EffectDeclaration::new(
            Effect::GrantAdvantageOnSave {
                save: SaveTarget::Frightened,
            },
        )),
        Trait::new("halfling_endurance", "halfling", "Endurance", 1)
            .with_effect(EffectDeclaration::stat(SheetStat::GritPoints, 1)),
        Trait::new("halfling_climber", "halfling", "Nimble Climber", 1).with_effect(
            EffectDeclaration::new(Effect::GrantMovementMode {
                mode: MovementMode::Climb,
                speed: MovementSpeed::HalfSpeed,
            }),
        ),
        Trait::new("halfling_small", "halfling", "Small-Sized", -1).with_effect(
            EffectDeclaration::ability("Small-Sized", "You are a Small creature."),
        ),
    ]
}

fn darkvision(range: u32) -> EffectDeclaration {
    EffectDeclaration::new(Effect::GrantSense {
        sense: Sense::Darkvision,
        range,
    })
}
