//! Skills, trades and languages - the things proficiency points buy.

use serde::{Deserialize, Serialize};

use crate::ids::{LanguageId, SkillId, TradeId};
use crate::value_objects::{Attribute, AttributeSet};

/// Which attribute a skill or trade rolls with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSource {
    Fixed(Attribute),
    /// Whatever the character's prime attribute is (Awareness)
    Prime,
}

impl AttributeSource {
    /// Resolve to a concrete attribute for the given final attributes.
    pub fn resolve(&self, attributes: &AttributeSet) -> Attribute {
        match self {
            Self::Fixed(attribute) => *attribute,
            Self::Prime => attributes.prime().0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub attribute: AttributeSource,
    #[serde(default)]
    pub description: String,
}

impl SkillDefinition {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>, attribute: AttributeSource) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attribute,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeDefinition {
    pub id: TradeId,
    pub name: String,
    pub attribute: AttributeSource,
    /// Tool kit the trade needs, if any
    #[serde(default)]
    pub tools: Option<String>,
}

impl TradeDefinition {
    pub fn new(id: impl Into<TradeId>, name: impl Into<String>, attribute: AttributeSource) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attribute,
            tools: None,
        }
    }

    pub fn with_tools(mut self, tools: impl Into<String>) -> Self {
        self.tools = Some(tools.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDefinition {
    pub id: LanguageId,
    pub name: String,
    /// Known fluently by every character at no cost
    #[serde(default)]
    pub default_fluent: bool,
}

impl LanguageDefinition {
    pub fn new(id: impl Into<LanguageId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_fluent: false,
        }
    }

    pub fn default_fluent(id: impl Into<LanguageId>, name: impl Into<String>) -> Self {
        Self {
            default_fluent: true,
            ..Self::new(id, name)
        }
    }
}
