use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::scenario::ScoreValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}

/// One attendee's participation in one round of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameModel {
    pub event_slug: String,
    pub round: u32,  // 0-based
    pub table: u32,  // 1-based, shared with the opponent
    pub attendee_id: String,
    pub published: bool,
    pub result: Option<GameResult>,
    pub routed_points: Option<u32>,
    pub scores: Option<ScoreValues>,
    pub scenario_points: Option<u32>,
    pub total_score: Option<u32>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerGameModel {
    /// Creates an empty, unpublished game at `table`
    pub fn new(event_slug: &str, round: u32, table: u32, attendee_id: &str) -> Self {
        Self {
            event_slug: event_slug.to_string(),
            round,
            table,
            attendee_id: attendee_id.to_string(),
            published: false,
            result: None,
            routed_points: None,
            scores: None,
            scenario_points: None,
            total_score: None,
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Where a round is in its lifecycle, derived from its games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    Unpopulated,
    Populated,
    Published,
}

impl RoundState {
    pub fn of(games: &[PlayerGameModel]) -> Self {
        if games.is_empty() {
            RoundState::Unpopulated
        } else if games.iter().all(|g| g.published) {
            RoundState::Published
        } else {
            RoundState::Populated
        }
    }
}

/// Display order: table, then attendee
pub fn sort_games(games: &mut [PlayerGameModel]) {
    games.sort_by(|a, b| {
        a.table
            .cmp(&b.table)
            .then_with(|| a.attendee_id.cmp(&b.attendee_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_state_follows_publication() {
        let mut games = vec![
            PlayerGameModel::new("gt", 0, 1, "a"),
            PlayerGameModel::new("gt", 0, 1, "b"),
        ];
        assert_eq!(RoundState::of(&[]), RoundState::Unpopulated);
        assert_eq!(RoundState::of(&games), RoundState::Populated);

        games[0].published = true;
        assert_eq!(RoundState::of(&games), RoundState::Populated);

        games[1].published = true;
        assert_eq!(RoundState::of(&games), RoundState::Published);
    }

    #[test]
    fn sorts_by_table_then_attendee() {
        let mut games = vec![
            PlayerGameModel::new("gt", 0, 2, "a"),
            PlayerGameModel::new("gt", 0, 1, "d"),
            PlayerGameModel::new("gt", 0, 1, "c"),
            PlayerGameModel::new("gt", 0, 2, "b"),
        ];
        sort_games(&mut games);

        let order: Vec<(u32, &str)> = games
            .iter()
            .map(|g| (g.table, g.attendee_id.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "c"), (1, "d"), (2, "a"), (2, "b")]);
    }

    #[test]
    fn game_result_round_trips_through_text() {
        assert_eq!(GameResult::Draw.to_string(), "Draw");
        assert_eq!(GameResult::from_str("Loss").unwrap(), GameResult::Loss);
        assert!(GameResult::from_str("Forfeit").is_err());
    }
}
