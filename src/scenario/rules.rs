use serde::Serialize;

use super::inputs::ScoreValues;
use super::normalise::{normalise, Variant};

/// Multiplier applied to one declared score input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weight {
    pub input: String,
    pub weight: u32,
}

impl Weight {
    pub fn new(input: &str, weight: u32) -> Self {
        Self {
            input: input.to_string(),
            weight,
        }
    }
}

fn weighted_total(values: &ScoreValues, weights: &[Weight]) -> u32 {
    weights
        .iter()
        .map(|w| values.get(&w.input).saturating_mul(w.weight))
        .fold(0u32, u32::saturating_add)
}

/// Point function of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringRule {
    /// Weighted sum of the player's own inputs; the opponent is ignored
    DirectSum { weights: Vec<Weight> },
    /// Both sides' weighted totals fed through [`normalise`]
    Normalised { weights: Vec<Weight>, variant: Variant },
}

impl ScoringRule {
    pub fn score(&self, player: &ScoreValues, opponent: &ScoreValues) -> u32 {
        match self {
            ScoringRule::DirectSum { weights } => weighted_total(player, weights),
            ScoringRule::Normalised { weights, variant } => normalise(
                weighted_total(player, weights),
                weighted_total(opponent, weights),
                *variant,
            ),
        }
    }

    pub fn weights(&self) -> &[Weight] {
        match self {
            ScoringRule::DirectSum { weights } => weights,
            ScoringRule::Normalised { weights, .. } => weights,
        }
    }
}
