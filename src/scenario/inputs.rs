use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a score input is presented and encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreInputKind {
    /// Checkbox, stored as 0 or 1
    Boolean,
    /// Number field, optionally bounded by `max`
    Number,
}

/// One datum a player reports after a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub name: String,
    pub label: String,
    pub kind: ScoreInputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl ScoreInput {
    pub fn number(name: &str, label: &str, max: Option<u32>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ScoreInputKind::Number,
            max,
        }
    }

    pub fn boolean(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ScoreInputKind::Boolean,
            max: Some(1),
        }
    }
}

/// Reported values keyed by score input name. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreValues(BTreeMap<String, u32>);

impl ScoreValues {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or_default()
    }

    pub fn set(&mut self, name: &str, value: u32) {
        self.0.insert(name.to_string(), value);
    }

    pub fn with(mut self, name: &str, value: u32) -> Self {
        self.set(name, value);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Overlays `other` onto these values, keeping keys `other` does not mention
    pub fn merge(&mut self, other: &ScoreValues) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), *value);
        }
    }
}
