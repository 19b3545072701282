//! Built-in classes with their level-1 (and a few later) features.

use crate::entities::{ChoiceOption, ClassDefinition, ClassFeature, FeatureChoice, SpellList};
use crate::value_objects::{
    Attribute, DamageType, Effect, EffectCondition, EffectDeclaration, ResistanceAmount,
    SaveTarget, SheetStat,
};

pub(super) fn classes() -> Vec<ClassDefinition> {
    vec![barbarian(), champion(), cleric(), wizard()]
}

fn barbarian() -> ClassDefinition {
    ClassDefinition::new("barbarian", "Barbarian", 9)
        .with_martial(2, 4, 1)
        .with_save_masteries(vec![Attribute::Might, Attribute::Agility])
        .with_feature(
            ClassFeature::new("barbarian_rage", "Rage", 1)
                .with_description("Enter a rage for 1 minute as a free action.")
                .with_effect(EffectDeclaration::ability(
                    "Rage",
                    "While raging you deal +1 damage and resist physical damage.",
                ))
                .with_effect(rage_resistance(DamageType::Bludgeoning))
                .with_effect(rage_resistance(DamageType::Piercing))
                .with_effect(rage_resistance(DamageType::Slashing)),
        )
        .with_feature(
            ClassFeature::new("barbarian_berserker", "Berserker", 1)
                .with_effect(
                    EffectDeclaration::stat(SheetStat::MoveSpeed, 1)
                        .when(EffectCondition::NotWearingArmor),
                )
                .with_effect(EffectDeclaration::new(Effect::GrantAdvantageOnSave {
                    save: SaveTarget::Might,
                }))
                .with_choice(
                    FeatureChoice::new("barbarian_battlecry", "Choose a Battlecry", 1)
                        .with_option(
                            ChoiceOption::new("fortitude_shout", "Fortitude Shout")
                                .with_description("Allies within 5 spaces gain resistance to the next damage they take.")
                                .with_effect(EffectDeclaration::ability(
                                    "Fortitude Shout",
                                    "Spend 1 AP to shout; allies gain 1 temporary HP.",
                                )),
                        )
                        .with_option(
                            ChoiceOption::new("fury_shout", "Fury Shout").with_effect(
                                EffectDeclaration::ability(
                                    "Fury Shout",
                                    "Spend 1 AP to shout; allies deal +1 damage on their next attack.",
                                ),
                            ),
                        )
                        .with_option(
                            ChoiceOption::new("speed_shout", "Speed Shout")
                                .with_effect(EffectDeclaration::ability(
                                    "Speed Shout",
                                    "Spend 1 AP to shout; allies gain +1 speed until your next turn.",
                                ))
                                .with_effect(EffectDeclaration::stat(SheetStat::Initiative, 1)),
                        ),
                ),
        )
        .with_feature(
            ClassFeature::new("barbarian_shattering_force", "Shattering Force", 2).with_effect(
                EffectDeclaration::ability(
                    "Shattering Force",
                    "Your heavy hits ignore half of the target's damage reduction.",
                ),
            ),
        )
}

fn champion() -> ClassDefinition {
    ClassDefinition::new("champion", "Champion", 9)
        .with_martial(2, 4, 1)
        .with_save_masteries(vec![Attribute::Might, Attribute::Agility])
        .with_feature(
            ClassFeature::new("champion_master_at_arms", "Master-at-Arms", 1)
                .with_effect(EffectDeclaration::stat(SheetStat::StaminaPoints, 1))
                .with_choice(
                    FeatureChoice::new("champion_combat_training", "Choose a Combat Training", 1)
                        .with_option(
                            ChoiceOption::new("training_heavy_armor", "Heavy Armor Training")
                                .with_effect(EffectDeclaration::stat(SheetStat::AreaDefense, 1)),
                        )
                        .with_option(
                            ChoiceOption::new("training_weapon_master", "Weapon Master")
                                .with_effect(EffectDeclaration::stat(SheetStat::TechniquesKnown, 1)),
                        )
                        .with_option(
                            ChoiceOption::new("training_shield", "Shield Training")
                                .with_effect(EffectDeclaration::stat(
                                    SheetStat::PrecisionDefense,
                                    1,
                                )),
                        ),
                ),
        )
        .with_feature(
            ClassFeature::new("champion_fighting_spirit", "Fighting Spirit", 1)
                .with_effect(EffectDeclaration::ability(
                    "Second Wind",
                    "Once per combat, regain 2 HP and 1 SP as a minor action.",
                )),
        )
        .with_feature(
            ClassFeature::new("champion_adaptive_tactics", "Adaptive Tactics", 2).with_choice(
                FeatureChoice::new("champion_tactics", "Choose a Tactic", 1)
                    .with_option(ChoiceOption::new("tactic_aggressive", "Aggressive"))
                    .with_option(ChoiceOption::new("tactic_defensive", "Defensive")),
            ),
        )
}

fn cleric() -> ClassDefinition {
    ClassDefinition::new("cleric", "Cleric", 8)
        .with_spellcasting(6, 2, 3, vec![SpellList::Divine])
        .with_save_masteries(vec![Attribute::Charisma, Attribute::Intelligence])
        .with_feature(
            ClassFeature::new("cleric_divine_domain", "Divine Domain", 1).with_choice(
                FeatureChoice::new("cleric_domains", "Choose two Divine Domains", 2)
                    .with_option(
                        ChoiceOption::new("domain_life", "Life")
                            .with_effect(EffectDeclaration::stat(SheetStat::HitPoints, 1)),
                    )
                    .with_option(
                        ChoiceOption::new("domain_war", "War")
                            .with_effect(EffectDeclaration::stat(SheetStat::ManeuversKnown, 2)),
                    )
                    .with_option(
                        ChoiceOption::new("domain_knowledge", "Knowledge")
                            .with_effect(EffectDeclaration::stat(SheetStat::SkillPoints, 1)),
                    )
                    .with_option(
                        ChoiceOption::new("domain_protection", "Protection")
                            .with_effect(EffectDeclaration::stat(SheetStat::AreaDefense, 1)),
                    )
                    .with_option(
                        ChoiceOption::new("domain_light", "Light").with_effect(
                            EffectDeclaration::new(Effect::GrantSpell {
                                spell_id: "light".into(),
                            }),
                        ),
                    ),
            ),
        )
        .with_feature(
            ClassFeature::new("cleric_divine_blessing", "Divine Blessing", 1).with_effect(
                EffectDeclaration::ability(
                    "Divine Blessing",
                    "Spend 1 AP to grant a creature within 5 spaces a d8 Help Die.",
                ),
            ),
        )
}

fn wizard() -> ClassDefinition {
    ClassDefinition::new("wizard", "Wizard", 6)
        .with_spellcasting(6, 2, 3, vec![SpellList::Arcane])
        .with_save_masteries(vec![Attribute::Intelligence, Attribute::Charisma])
        .with_feature(
            ClassFeature::new("wizard_spellbook", "Spellbook", 1).with_effect(
                EffectDeclaration::ability(
                    "Spellbook",
                    "You can learn spells from scrolls and copy them into your book.",
                ),
            ),
        )
        .with_feature(
            ClassFeature::new("wizard_arcane_specialization", "Arcane Specialization", 1)
                .with_choice(
                    FeatureChoice::new("wizard_school", "Choose an Arcane Specialization", 1)
                        .with_option(
                            ChoiceOption::new("school_evocation", "Evocation")
                                .with_effect(EffectDeclaration::stat(SheetStat::SaveDc, 1)),
                        )
                        .with_option(
                            ChoiceOption::new("school_abjuration", "Abjuration").with_effect(
                                EffectDeclaration::new(Effect::GrantResistance {
                                    damage: DamageType::Psychic,
                                    amount: ResistanceAmount::Fixed(1),
                                })
                                .stacking(),
                            ),
                        )
                        .with_option(
                            ChoiceOption::new("school_divination", "Divination")
                                .with_effect(EffectDeclaration::stat(SheetStat::Initiative, 1)),
                        ),
                ),
        )
}

fn rage_resistance(damage: DamageType) -> EffectDeclaration {
    EffectDeclaration::new(Effect::GrantResistance {
        damage,
        amount: ResistanceAmount::Half,
    })
    .when(EffectCondition::WhileRaging)
}
