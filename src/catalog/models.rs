use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scenario::RoutedBand;

/// Scenario played in one round of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub scenario: String,
}

/// Static description of one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub rounds: Vec<RoundConfig>,
    /// Custom routed bonus table; the standard table applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routed_bands: Option<Vec<RoutedBand>>,
}

impl EventConfig {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}
