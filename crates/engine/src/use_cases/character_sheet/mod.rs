//! Character Derivation Engine.
//!
//! Turns a validated submission into a [`DerivedCharacterSheet`]. All
//! checking happens in the validation layer; once a submission is accepted,
//! derivation itself cannot fail.

use std::collections::BTreeMap;

use sheetsmith_domain::{
    AbilityEntry, Attribute, Capabilities, Capability, CheckScores, CreationRules, DefenseScore,
    Defenses, DerivedCharacterSheet, Fluency, LanguageEntry, MovementEntry, MovementMode,
    Proficiencies, ProficiencyScore, Progression, Repertoire, ResistanceEntry, ResourcePool,
    Resources, RulesCatalog, SaveScore, Sense, SenseEntry, SheetIdentity, SheetStat, Submission,
};

use super::validation::{AcceptedSubmission, Rejection, SubmissionValidator};

#[cfg(test)]
mod tests;

/// Validate `submission` and derive its sheet.
///
/// The catalog is only read. A rejected submission produces no partial sheet.
pub fn derive_character_sheet(
    catalog: &RulesCatalog,
    rules: &CreationRules,
    submission: &Submission,
) -> Result<DerivedCharacterSheet, Rejection> {
    let accepted = SubmissionValidator::new(catalog, rules, submission).validate()?;
    let sheet = derive_from_accepted(catalog, rules, &accepted);

    tracing::info!(
        character_id = ?sheet.character_id(),
        class_id = %sheet.class_id(),
        prime = %sheet.prime_attribute(),
        hit_points = sheet.resources().hit_points.max,
        "Derived character sheet"
    );

    Ok(sheet)
}

/// Compute the sheet for a submission that already passed validation.
pub fn derive_from_accepted(
    catalog: &RulesCatalog,
    rules: &CreationRules,
    accepted: &AcceptedSubmission<'_>,
) -> DerivedCharacterSheet {
    let submission = accepted.submission();
    let class = accepted.class();
    let attributes = *accepted.attributes();
    let cm = rules.combat_mastery();

    let identity = SheetIdentity {
        character_id: submission.character_id,
        name: submission.name.clone(),
        level: rules.level,
        class_id: class.id.clone(),
        class_name: class.name.clone(),
        ancestries: submission.ancestries.clone(),
        traits: submission.traits.clone(),
    };

    let sheet = DerivedCharacterSheet::new(identity, attributes, cm);
    let resources = resources(rules, accepted);
    let scores = check_scores(rules, accepted);

    let saves: BTreeMap<Attribute, SaveScore> = Attribute::ALL
        .iter()
        .map(|attribute| {
            let mastered = class.save_masteries.contains(attribute);
            let bonus = attributes.get(*attribute) + if mastered { cm } else { 0 };
            (*attribute, SaveScore { bonus, mastered })
        })
        .collect();

    let progression = Progression {
        path_points: submission.path_points.clone(),
        path_benefits: *accepted.path_benefits(),
        known_limits: *accepted.limits(),
    };

    let repertoire = Repertoire {
        spells: submission.spells.clone(),
        granted_spells: accepted.granted_spells().to_vec(),
        maneuvers: accepted.maneuvers().to_vec(),
        techniques: accepted.techniques().to_vec(),
    };

    sheet
        .with_resources(resources)
        .with_defenses(defenses(rules, accepted))
        .with_saves(saves)
        .with_capabilities(
            capabilities(accepted, scores.move_speed),
            accepted.effects().conditional().to_vec(),
        )
        .with_scores(scores)
        .with_proficiencies(proficiencies(catalog, accepted))
        .with_progression(progression)
        .with_repertoire(repertoire)
        .with_feature_choices(accepted.feature_choices().clone())
}

// =============================================================================
// Sections
// =============================================================================

fn resources(rules: &CreationRules, accepted: &AcceptedSubmission<'_>) -> Resources {
    let class = accepted.class();
    let attributes = accepted.attributes();
    let benefits = accepted.path_benefits();
    let stat = |s| accepted.effects().stat_modifier(s);

    let hit_points =
        ResourcePool::full(class.base_hit_points + attributes.might + stat(SheetStat::HitPoints));
    let stamina_points = ResourcePool::full(
        class.base_stamina_points + benefits.stamina_points as i32 + stat(SheetStat::StaminaPoints),
    );
    let mana_points = ResourcePool::full(
        class.base_mana_points + benefits.mana_points as i32 + stat(SheetStat::ManaPoints),
    );
    let grit_points = ResourcePool::full(
        rules.base_grit_points + attributes.charisma + stat(SheetStat::GritPoints),
    );
    let rest_points = ResourcePool::full(hit_points.max + stat(SheetStat::RestPoints));

    Resources {
        hit_points,
        stamina_points,
        mana_points,
        grit_points,
        rest_points,
    }
}

fn defenses(rules: &CreationRules, accepted: &AcceptedSubmission<'_>) -> Defenses {
    let a = accepted.attributes();
    let cm = rules.combat_mastery();
    let stat = |s| accepted.effects().stat_modifier(s);

    Defenses {
        precision: DefenseScore::new(
            rules.defense_base + cm + a.agility + a.intelligence + stat(SheetStat::PrecisionDefense),
        ),
        area: DefenseScore::new(
            rules.defense_base + cm + a.might + a.charisma + stat(SheetStat::AreaDefense),
        ),
    }
}

fn check_scores(rules: &CreationRules, accepted: &AcceptedSubmission<'_>) -> CheckScores {
    let a = accepted.attributes();
    let cm = rules.combat_mastery();
    let (_, prime) = a.prime();
    let stat = |s| accepted.effects().stat_modifier(s);

    CheckScores {
        save_dc: rules.save_dc_base + cm + prime + stat(SheetStat::SaveDc),
        check_bonus: cm + prime,
        initiative: cm + a.agility + stat(SheetStat::Initiative),
        move_speed: rules.base_move_speed + stat(SheetStat::MoveSpeed),
        jump_distance: a.agility.max(1) + stat(SheetStat::JumpDistance),
        death_threshold: -(prime + cm),
    }
}

/// Granted capabilities in display form. Duplicate movement modes and senses
/// keep the best speed or range.
fn capabilities(accepted: &AcceptedSubmission<'_>, move_speed: i32) -> Capabilities {
    let mut movement: BTreeMap<MovementMode, i32> = BTreeMap::new();
    let mut senses: BTreeMap<Sense, u32> = BTreeMap::new();
    let mut caps = Capabilities::default();

    for (capability, multiplicity) in accepted.effects().capabilities() {
        match capability {
            Capability::Movement { mode, speed } => {
                let speed = speed.resolve(move_speed);
                let best = movement.entry(*mode).or_insert(speed);
                *best = (*best).max(speed);
            }
            Capability::Sense { sense, range } => {
                let best = senses.entry(*sense).or_insert(*range);
                *best = (*best).max(*range);
            }
            Capability::Resistance { damage, amount } => caps.resistances.push(ResistanceEntry {
                damage: *damage,
                amount: amount.stacked(multiplicity),
            }),
            Capability::Ability { name, description } => caps.abilities.push(AbilityEntry {
                name: name.clone(),
                description: description.clone(),
            }),
            Capability::SaveAdvantage { save } => caps.save_advantages.push(*save),
            // listed in the repertoire
            Capability::Spell { .. } => {}
        }
    }

    caps.movement = movement
        .into_iter()
        .map(|(mode, speed)| MovementEntry { mode, speed })
        .collect();
    caps.senses = senses
        .into_iter()
        .map(|(sense, range)| SenseEntry { sense, range })
        .collect();
    caps
}

/// Every skill (rank 0 included), the selected trades, and the known
/// languages with default-fluent ones always present.
fn proficiencies(catalog: &RulesCatalog, accepted: &AcceptedSubmission<'_>) -> Proficiencies {
    let attributes = accepted.attributes();
    let selections = &accepted.submission().proficiencies;
    let score = |attribute: Attribute, rank: u8| attributes.get(attribute) + 2 * i32::from(rank);

    let skills = catalog
        .skills()
        .map(|skill| {
            let attribute = skill.attribute.resolve(attributes);
            let rank = selections.skills.get(&skill.id).copied().unwrap_or(0);
            ProficiencyScore {
                id: skill.id.clone(),
                name: skill.name.clone(),
                attribute,
                rank,
                bonus: score(attribute, rank),
            }
        })
        .collect();

    let trades = catalog
        .trades()
        .filter_map(|trade| {
            let rank = *selections.trades.get(&trade.id)?;
            let attribute = trade.attribute.resolve(attributes);
            Some(ProficiencyScore {
                id: trade.id.clone(),
                name: trade.name.clone(),
                attribute,
                rank,
                bonus: score(attribute, rank),
            })
        })
        .collect();

    let languages = catalog
        .languages()
        .filter_map(|language| {
            let fluency = if language.default_fluent {
                Fluency::Fluent
            } else {
                *selections.languages.get(&language.id)?
            };
            Some(LanguageEntry {
                language_id: language.id.clone(),
                name: language.name.clone(),
                fluency,
            })
        })
        .collect();

    Proficiencies {
        skills,
        trades,
        languages,
        summary: accepted.budget().summary(),
    }
}
