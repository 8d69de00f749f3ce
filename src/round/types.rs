use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::{GameResult, PlayerGameModel, RoundState};
use crate::scenario::ScoreValues;

/// One player's report for a table. Absent fields keep their stored values.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSubmission {
    pub attendee_id: String,
    #[serde(default)]
    pub result: Option<GameResult>,
    #[serde(default)]
    pub routed_points: Option<u32>,
    #[serde(default)]
    pub scores: Option<ScoreValues>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitScoresRequest {
    pub submissions: Vec<ScoreSubmission>,
}

/// Attendee id -> corrected table number
#[derive(Debug, Clone, Deserialize)]
pub struct TableCorrectionsRequest {
    pub tables: HashMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedWrite {
    pub attendee_id: String,
    pub error: String,
}

/// Per-record outcome of a batch of independent writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedWrite>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulateResponse {
    pub tables: Vec<u32>,
    /// Attendee left without an opponent when the count is odd
    pub unpaired: Option<String>,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResponse {
    pub event_slug: String,
    pub round: u32,
    pub scenario: String,
    pub state: RoundState,
    pub games: Vec<PlayerGameModel>,
}
