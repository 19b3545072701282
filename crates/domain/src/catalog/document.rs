//! Versioned catalog documents and the v1 -> v2 migration.
//!
//! Version 2 is the typed schema: every effect is an [`EffectDeclaration`]
//! with a tagged [`Effect`]. Version 1 stored effects as loose
//! `{type, target, value, condition?, stacks?}` records; those are rewritten
//! in place on the raw JSON tree before typed deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::entities::{
    Ancestry, ClassDefinition, LanguageDefinition, Maneuver, PathDefinition, SkillDefinition,
    Spell, TradeDefinition, Trait,
};
use crate::error::CatalogKind;
use crate::ids::SpellId;
use crate::value_objects::{
    Attribute, DamageType, Effect, EffectCondition, EffectDeclaration, MovementMode,
    MovementSpeed, ResistanceAmount, SaveTarget, Sense, SheetStat,
};

/// Schema version produced by [`migrate_v1_to_v2`] and by `serialize`.
pub const CURRENT_CATALOG_VERSION: u64 = 2;

/// Errors raised while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported catalog version {found} (latest is {latest})")]
    UnsupportedVersion { found: u64, latest: u64 },

    #[error("Cannot migrate catalog: {0}")]
    Migration(String),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: CatalogKind, id: String },

    #[error("{owner} references unknown {kind} '{id}'")]
    DanglingReference {
        owner: String,
        kind: CatalogKind,
        id: String,
    },
}

impl CatalogError {
    fn migration(msg: impl Into<String>) -> Self {
        Self::Migration(msg.into())
    }
}

/// A full catalog in the current schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub version: u64,
    #[serde(default)]
    pub ancestries: Vec<Ancestry>,
    #[serde(default)]
    pub traits: Vec<Trait>,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub paths: Vec<PathDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub trades: Vec<TradeDefinition>,
    #[serde(default)]
    pub languages: Vec<LanguageDefinition>,
    #[serde(default)]
    pub spells: Vec<Spell>,
    #[serde(default)]
    pub maneuvers: Vec<Maneuver>,
}

impl CatalogDocument {
    /// Parse a document of any supported version, migrating as needed.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Value = serde_json::from_str(json)?;
        let version = raw.get("version").and_then(Value::as_u64).unwrap_or(1);
        let current = match version {
            1 => migrate_v1_to_v2(raw)?,
            CURRENT_CATALOG_VERSION => raw,
            found => {
                return Err(CatalogError::UnsupportedVersion {
                    found,
                    latest: CURRENT_CATALOG_VERSION,
                })
            }
        };
        Ok(serde_json::from_value(current)?)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Rewrite a version-1 catalog tree into the version-2 schema.
///
/// Every `effects` array anywhere in the tree is converted. Unknown effect
/// types or targets, and conditions that are not readable text, fail the
/// whole migration; nothing is half-converted.
pub fn migrate_v1_to_v2(mut document: Value) -> Result<Value, CatalogError> {
    let version = document.get("version").and_then(Value::as_u64).unwrap_or(1);
    if version != 1 {
        return Err(CatalogError::migration(format!(
            "expected a version 1 document, found version {}",
            version
        )));
    }
    rewrite_effects(&mut document)?;
    match document.as_object_mut() {
        Some(root) => {
            root.insert("version".to_string(), Value::from(CURRENT_CATALOG_VERSION));
        }
        None => return Err(CatalogError::migration("catalog root must be an object")),
    }
    Ok(document)
}

fn rewrite_effects(value: &mut Value) -> Result<(), CatalogError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "effects" {
                    let items = child
                        .as_array_mut()
                        .ok_or_else(|| CatalogError::migration("'effects' must be an array"))?;
                    for item in items.iter_mut() {
                        let declaration = migrate_effect(item)?;
                        *item = serde_json::to_value(declaration)?;
                    }
                } else {
                    rewrite_effects(child)?;
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter_mut().try_for_each(rewrite_effects),
        _ => Ok(()),
    }
}

/// Convert one loose v1 effect record.
fn migrate_effect(record: &Value) -> Result<EffectDeclaration, CatalogError> {
    let effect_type = str_field(record, "type")?;
    let target = str_field(record, "target")?;
    let value = record.get("value").unwrap_or(&Value::Null);

    let effect = match effect_type {
        "MODIFY_ATTRIBUTE" => Effect::ModifyAttribute {
            attribute: parse_target::<Attribute>(effect_type, target)?,
            value: int_value(effect_type, value)?,
        },
        "MODIFY_STAT" => Effect::ModifyStat {
            stat: parse_target::<SheetStat>(effect_type, target)?,
            value: int_value(effect_type, value)?,
        },
        "GRANT_MOVEMENT" => Effect::GrantMovementMode {
            mode: parse_target::<MovementMode>(effect_type, target)?,
            speed: match value.as_str() {
                Some(speed) => speed
                    .parse::<MovementSpeed>()
                    .map_err(|_| unknown_value(effect_type, speed))?,
                None => MovementSpeed::EqualToSpeed,
            },
        },
        "GRANT_SENSE" => Effect::GrantSense {
            sense: parse_target::<Sense>(effect_type, target)?,
            range: value
                .as_u64()
                .and_then(|range| u32::try_from(range).ok())
                .ok_or_else(|| unknown_value(effect_type, &value.to_string()))?,
        },
        "GRANT_RESISTANCE" => Effect::GrantResistance {
            damage: parse_target::<DamageType>(effect_type, target)?,
            amount: resistance_amount(effect_type, value)?,
        },
        "GRANT_ABILITY" => Effect::GrantAbility {
            name: target.to_string(),
            description: value.as_str().unwrap_or_default().to_string(),
        },
        "GRANT_SPELL" => Effect::GrantSpell {
            spell_id: SpellId::new(target),
        },
        "GRANT_ADV_SAVE" => Effect::GrantAdvantageOnSave {
            save: parse_target::<SaveTarget>(effect_type, target)?,
        },
        other => {
            return Err(CatalogError::migration(format!(
                "unknown effect type '{}'",
                other
            )))
        }
    };

    let mut declaration = EffectDeclaration::new(effect);
    match record.get("condition") {
        None | Some(Value::Null) => {}
        Some(raw) => {
            let condition = raw
                .as_str()
                .and_then(|text| text.parse::<EffectCondition>().ok())
                .ok_or_else(|| {
                    CatalogError::migration(format!(
                        "invalid condition {} on {} effect",
                        raw, effect_type
                    ))
                })?;
            declaration = declaration.when(condition);
        }
    }
    if record.get("stacks").and_then(Value::as_bool).unwrap_or(false) {
        declaration = declaration.stacking();
    }
    Ok(declaration)
}

fn str_field<'a>(record: &'a Value, field: &str) -> Result<&'a str, CatalogError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::migration(format!("effect is missing '{}': {}", field, record)))
}

fn parse_target<T: std::str::FromStr>(effect_type: &str, target: &str) -> Result<T, CatalogError> {
    target.parse::<T>().map_err(|_| {
        CatalogError::migration(format!("unknown target '{}' for {}", target, effect_type))
    })
}

fn int_value(effect_type: &str, value: &Value) -> Result<i32, CatalogError> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| unknown_value(effect_type, &value.to_string()))
}

fn resistance_amount(effect_type: &str, value: &Value) -> Result<ResistanceAmount, CatalogError> {
    if let Some(fixed) = value.as_u64() {
        return u32::try_from(fixed)
            .map(ResistanceAmount::Fixed)
            .map_err(|_| unknown_value(effect_type, &fixed.to_string()));
    }
    match value.as_str().map(str::to_lowercase).as_deref() {
        Some("half") | Some("resistance") | None => Ok(ResistanceAmount::Half),
        Some("immune") | Some("immunity") => Ok(ResistanceAmount::Immune),
        Some(other) => Err(unknown_value(effect_type, other)),
    }
}

fn unknown_value(effect_type: &str, value: &str) -> CatalogError {
    CatalogError::migration(format!("invalid value {} for {}", value, effect_type))
}
