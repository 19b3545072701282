//! Path Progression Calculator.
//!
//! Tiers are cumulative: investing N points in a path grants every tier with
//! `path_level <= N`.

use sheetsmith_domain::{PathBenefits, PathProgressionState, RulesCatalog, RulesError};

/// Sum the benefits of every unlocked tier across all catalog paths.
///
/// Paths missing from `state` count as 0 points. Ids in `state` that are not
/// catalog paths contribute nothing; [`validate_path_state`] rejects them.
pub fn calculate_total_path_benefits(
    catalog: &RulesCatalog,
    state: &PathProgressionState,
) -> PathBenefits {
    let mut total = PathBenefits::default();
    for path in catalog.paths() {
        let points = state.points(&path.id);
        if points == 0 {
            continue;
        }
        for tier in path.tiers_reached(points) {
            total += &tier.benefits;
        }
    }
    total
}

/// Every path must exist and hold no more points than it has tiers.
pub fn validate_path_state(
    catalog: &RulesCatalog,
    state: &PathProgressionState,
) -> Result<(), RulesError> {
    for (path_id, points) in state.iter() {
        let path = catalog.path(path_id)?;
        let max_tier = path.max_tier();
        if points > max_tier {
            return Err(RulesError::PathPointsExceeded {
                path_id: path_id.clone(),
                invested: points,
                max_tier,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_domain::{ErrorKind, PathBenefits};

    fn state(martial: u32, spellcaster: u32) -> PathProgressionState {
        PathProgressionState::new()
            .with("martial_path", martial)
            .with("spellcaster_path", spellcaster)
    }

    #[test]
    fn mixed_investment_sums_both_paths() {
        let catalog = RulesCatalog::builtin();
        let benefits = calculate_total_path_benefits(&catalog, &state(1, 2));
        assert_eq!(
            benefits,
            PathBenefits {
                stamina_points: 1,
                mana_points: 4,
                maneuvers_learned: 1,
                techniques_learned: 1,
                cantrips_learned: 2,
                spells_learned: 1,
            }
        );
    }

    #[test]
    fn empty_state_grants_nothing() {
        let catalog = RulesCatalog::builtin();
        assert_eq!(
            calculate_total_path_benefits(&catalog, &PathProgressionState::new()),
            PathBenefits::default()
        );
    }

    #[test]
    fn benefits_are_monotonic_in_points() {
        let catalog = RulesCatalog::builtin();
        for martial in 0..4 {
            for spellcaster in 0..4 {
                let base = calculate_total_path_benefits(&catalog, &state(martial, spellcaster));
                let more_martial =
                    calculate_total_path_benefits(&catalog, &state(martial + 1, spellcaster));
                let more_caster =
                    calculate_total_path_benefits(&catalog, &state(martial, spellcaster + 1));
                assert!(more_martial.dominates(&base));
                assert!(more_caster.dominates(&base));
            }
        }
    }

    #[test]
    fn full_martial_path() {
        let catalog = RulesCatalog::builtin();
        let benefits = calculate_total_path_benefits(&catalog, &state(4, 0));
        assert_eq!(benefits.stamina_points, 4);
        assert_eq!(benefits.maneuvers_learned, 4);
        assert_eq!(benefits.techniques_learned, 2);
        assert_eq!(benefits.mana_points, 0);
    }

    #[test]
    fn points_above_max_tier_are_rejected() {
        let catalog = RulesCatalog::builtin();
        let err = validate_path_state(&catalog, &state(5, 0)).expect_err("too many points");
        assert_eq!(err.kind(), ErrorKind::PathPointsError);
        assert!(validate_path_state(&catalog, &state(4, 4)).is_ok());
    }

    #[test]
    fn unknown_path_is_rejected() {
        let catalog = RulesCatalog::builtin();
        let err = validate_path_state(&catalog, &PathProgressionState::new().with("shadow_path", 1))
            .expect_err("unknown path");
        assert_eq!(err.kind(), ErrorKind::UnknownCatalogId);
    }
}
