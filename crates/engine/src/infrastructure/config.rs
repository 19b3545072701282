//! Engine configuration from environment variables.
//!
//! Every variable is optional; unset values keep the level-1 defaults of
//! [`CreationRules`]. A set-but-unparseable value is an error, never a
//! silent fallback.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use sheetsmith_domain::{CreationRules, RulesCatalog};

pub const CATALOG_PATH_VAR: &str = "SHEETSMITH_CATALOG_PATH";

/// Resolved engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub rules: CreationRules,
    /// JSON catalog to load instead of the built-in content
    pub catalog_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Read `SHEETSMITH_*` variables from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut rules = CreationRules::default();

        override_from(&lookup, "SHEETSMITH_ATTRIBUTE_POINTS", &mut rules.attribute_point_budget)?;
        override_from(&lookup, "SHEETSMITH_ATTRIBUTE_FLOOR", &mut rules.attribute_floor)?;
        override_from(&lookup, "SHEETSMITH_ATTRIBUTE_CAP", &mut rules.attribute_cap)?;
        override_from(&lookup, "SHEETSMITH_ANCESTRY_POINTS", &mut rules.ancestry_point_budget)?;
        override_from(&lookup, "SHEETSMITH_SKILL_POINTS", &mut rules.base_skill_points)?;
        override_from(&lookup, "SHEETSMITH_TRADE_POINTS", &mut rules.base_trade_points)?;
        override_from(&lookup, "SHEETSMITH_LANGUAGE_POINTS", &mut rules.base_language_points)?;
        override_from(&lookup, "SHEETSMITH_MAX_SKILL_RANK", &mut rules.max_skill_rank)?;
        override_from(&lookup, "SHEETSMITH_MAX_TRADE_RANK", &mut rules.max_trade_rank)?;

        if rules.attribute_floor > rules.attribute_cap {
            anyhow::bail!(
                "attribute floor ({}) is above the attribute cap ({})",
                rules.attribute_floor,
                rules.attribute_cap
            );
        }

        let catalog_path = lookup(CATALOG_PATH_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            rules,
            catalog_path,
        })
    }
}

fn override_from<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> anyhow::Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", key, raw))?;
    }
    Ok(())
}

/// Load the configured catalog, or the built-in content when no path is set.
pub fn load_catalog(config: &EngineConfig) -> anyhow::Result<RulesCatalog> {
    match &config.catalog_path {
        Some(path) => load_catalog_file(path),
        None => {
            tracing::info!("Using built-in rules catalog");
            Ok(RulesCatalog::builtin())
        }
    }
}

/// Read and parse a version 1 or 2 JSON catalog file.
pub fn load_catalog_file(path: &Path) -> anyhow::Result<RulesCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog = RulesCatalog::from_json(&json)
        .with_context(|| format!("Invalid catalog file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        classes = catalog.classes().count(),
        ancestries = catalog.ancestries().count(),
        "Loaded rules catalog"
    );
    Ok(catalog)
}
