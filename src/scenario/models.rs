use serde::Serialize;

use super::inputs::{ScoreInput, ScoreValues};
use super::rules::ScoringRule;
use crate::catalog::CatalogError;

/// Immutable scenario definition
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub setup: String,
    pub scoring: String,
    pub score_inputs: Vec<ScoreInput>,
    pub rule: ScoringRule,
}

impl Scenario {
    /// Builds a scenario, rejecting rules that reference undeclared inputs
    pub fn new(
        id: &str,
        name: &str,
        setup: &str,
        scoring: &str,
        score_inputs: Vec<ScoreInput>,
        rule: ScoringRule,
    ) -> Result<Self, CatalogError> {
        for weight in rule.weights() {
            if !score_inputs.iter().any(|input| input.name == weight.input) {
                return Err(CatalogError::UndeclaredInput {
                    scenario: id.to_string(),
                    input: weight.input.clone(),
                });
            }
        }

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            setup: setup.to_string(),
            scoring: scoring.to_string(),
            score_inputs,
            rule,
        })
    }

    /// Tournament points for `player` against `opponent`
    pub fn points(&self, player: &ScoreValues, opponent: &ScoreValues) -> u32 {
        self.rule.score(player, opponent)
    }

    /// Names in `values` that this scenario does not declare
    pub fn unknown_inputs<'a>(&self, values: &'a ScoreValues) -> Vec<&'a str> {
        values
            .keys()
            .filter(|key| !self.score_inputs.iter().any(|input| input.name == *key))
            .collect()
    }
}
