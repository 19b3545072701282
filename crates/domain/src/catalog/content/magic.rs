//! Built-in spells, maneuvers and techniques.

use crate::entities::{Maneuver, ManeuverCategory, Spell, SpellList};

use SpellList::{Arcane, Divine, Primal};

pub(super) fn spells() -> Vec<Spell> {
    vec![
        // Cantrips
        Spell::cantrip("spark", "Spark")
            .on_lists(vec![Arcane, Primal])
            .with_school("Evocation"),
        Spell::cantrip("light", "Light")
            .on_lists(vec![Arcane, Divine])
            .with_school("Illusion"),
        Spell::cantrip("mage_hand", "Mage Hand")
            .on_lists(vec![Arcane])
            .with_school("Conjuration"),
        Spell::cantrip("sacred_bolt", "Sacred Bolt")
            .on_lists(vec![Divine])
            .with_school("Evocation"),
        Spell::cantrip("guidance", "Guidance")
            .on_lists(vec![Divine, Primal])
            .with_school("Divination"),
        // Spells
        Spell::new("magic_missile", "Magic Missile", 1)
            .on_lists(vec![Arcane])
            .with_school("Evocation"),
        Spell::new("shield", "Shield", 1)
            .on_lists(vec![Arcane])
            .with_school("Abjuration"),
        Spell::new("burning_hands", "Burning Hands", 1)
            .on_lists(vec![Arcane, Primal])
            .with_school("Evocation"),
        Spell::new("heal", "Heal", 1)
            .on_lists(vec![Divine, Primal])
            .with_school("Restoration"),
        Spell::new("bless", "Bless", 1)
            .on_lists(vec![Divine])
            .with_school("Enchantment"),
        Spell::new("command", "Command", 1)
            .on_lists(vec![Divine])
            .with_school("Enchantment"),
        Spell::new("entangle", "Entangle", 1)
            .on_lists(vec![Primal])
            .with_school("Conjuration"),
    ]
}

pub(super) fn maneuvers() -> Vec<Maneuver> {
    use ManeuverCategory::{Attack, Defense, Grapple, Save};

    vec![
        Maneuver::new("power_attack", "Power Attack", Attack),
        Maneuver::new("sweep_attack", "Sweep Attack", Attack),
        Maneuver::new("extend_attack", "Extend Attack", Attack),
        Maneuver::new("parry", "Parry", Defense),
        Maneuver::new("protect", "Protect", Defense),
        Maneuver::new("raise_shield", "Raise Shield", Defense),
        Maneuver::new("trip", "Trip", Grapple),
        Maneuver::new("body_block", "Body Block", Grapple),
        Maneuver::new("taunt", "Taunt", Save),
        // Techniques
        Maneuver::technique("whirlwind", "Whirlwind", Attack, 2),
        Maneuver::technique("heroic_riposte", "Heroic Riposte", Defense, 1),
        Maneuver::technique("forceful_blow", "Forceful Blow", Attack, 2),
    ]
}
