use futures::future::{join_all, try_join_all};
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{sort_games, PlayerGameModel, RoundState},
    repository::{CreateGameResult, PlayerGameRepository},
    types::{BatchOutcome, FailedWrite, PopulateResponse, RoundResponse, ScoreSubmission},
};
use crate::{
    attendee::{models::AttendeeModel, repository::AttendeeDirectory},
    catalog::TournamentCatalog,
    scenario::{routed_bonus, RoutedBand, Scenario, ScoreValues},
    shared::{AppError, AppState},
    standings::{tally, Totals},
};

enum WriteStatus {
    Written,
    Skipped,
}

fn collect_outcome(results: Vec<(String, Result<WriteStatus, AppError>)>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (attendee_id, result) in results {
        match result {
            Ok(WriteStatus::Written) => outcome.succeeded.push(attendee_id),
            Ok(WriteStatus::Skipped) => outcome.skipped.push(attendee_id),
            Err(error) => {
                warn!(attendee_id = %attendee_id, error = %error, "Game write failed");
                outcome.failed.push(FailedWrite {
                    attendee_id,
                    error: error.to_string(),
                });
            }
        }
    }
    outcome
}

/// Recomputes scenario points and totals for every game at a table.
///
/// Each player is scored against the other player's inputs. Inputs nobody
/// reported read as zero, so a player who only reports routed points still
/// gets their bonus.
pub fn score_table(scenario: &Scenario, bands: &[RoutedBand], games: &mut [PlayerGameModel]) {
    let inputs: Vec<ScoreValues> = games
        .iter()
        .map(|g| g.scores.clone().unwrap_or_default())
        .collect();

    for (index, game) in games.iter_mut().enumerate() {
        let opponent = inputs
            .iter()
            .enumerate()
            .find(|(i, _)| *i != index)
            .map(|(_, scores)| scores.clone())
            .unwrap_or_default();

        let points = scenario.points(&inputs[index], &opponent);
        let bonus = routed_bonus(game.routed_points.unwrap_or_default(), bands);
        game.scenario_points = Some(points);
        game.total_score = Some(points.saturating_add(bonus));
    }
}

/// Service driving the round lifecycle: populate, correct, score, publish
pub struct RoundService {
    catalog: Arc<TournamentCatalog>,
    attendees: Arc<dyn AttendeeDirectory + Send + Sync>,
    games: Arc<dyn PlayerGameRepository + Send + Sync>,
}

impl RoundService {
    pub fn new(
        catalog: Arc<TournamentCatalog>,
        attendees: Arc<dyn AttendeeDirectory + Send + Sync>,
        games: Arc<dyn PlayerGameRepository + Send + Sync>,
    ) -> Self {
        Self {
            catalog,
            attendees,
            games,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.catalog),
            Arc::clone(&state.attendee_directory),
            Arc::clone(&state.game_repository),
        )
    }

    fn scenario(&self, event_slug: &str, round: u32) -> Result<&Scenario, AppError> {
        self.catalog.round_scenario(event_slug, round as usize)
    }

    /// Pairs every attendee without a game this round.
    ///
    /// Lowest ranked attendees are paired first, ties broken at random. With an
    /// odd count the last attendee is left without a game and reported in the
    /// response.
    #[instrument(skip(self))]
    pub async fn populate(&self, event_slug: &str, round: u32) -> Result<PopulateResponse, AppError> {
        self.scenario(event_slug, round)?;

        let attendees = self.attendees.list_attendees_for_event(event_slug).await?;
        let existing = self.games.list_round(event_slug, round).await?;
        let ranking = tally(&self.games.list_event(event_slug).await?);

        let assigned: HashSet<&str> = existing.iter().map(|g| g.attendee_id.as_str()).collect();
        let mut to_assign: Vec<(Totals, AttendeeModel)> = attendees
            .into_iter()
            .filter(|a| !assigned.contains(a.id.as_str()))
            .map(|a| (ranking.get(&a.id).copied().unwrap_or_default(), a))
            .collect();

        debug!(
            attendee_count = to_assign.len(),
            existing_games = existing.len(),
            "Attendees to assign"
        );

        // Shuffle before the stable sort so equal keys land in random order
        to_assign.shuffle(&mut rand::rng());
        to_assign.sort_by_key(|(totals, _)| (totals.tournament_points, totals.routed_points));

        let mut next_table = existing.iter().map(|g| g.table).max().unwrap_or(0) + 1;
        let mut tables = Vec::new();
        let mut new_games = Vec::new();
        let mut pairs = to_assign.chunks_exact(2);
        for pair in pairs.by_ref() {
            for (_, attendee) in pair {
                new_games.push(PlayerGameModel::new(event_slug, round, next_table, &attendee.id));
            }
            tables.push(next_table);
            next_table += 1;
        }

        let unpaired = pairs.remainder().first().map(|(_, a)| a.id.clone());
        if let Some(attendee_id) = &unpaired {
            warn!(attendee_id = %attendee_id, "Odd number of attendees, last attendee left unpaired");
        }

        let repository = &self.games;
        let writes = new_games.iter().map(|game| async move {
            let status = repository.create_game(game).await.map(|created| match created {
                CreateGameResult::Created(_) => WriteStatus::Written,
                CreateGameResult::AlreadyExists(_) => WriteStatus::Skipped,
            });
            (game.attendee_id.clone(), status)
        });
        let outcome = collect_outcome(join_all(writes).await);

        info!(
            event_slug = %event_slug,
            round,
            tables = tables.len(),
            created = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Round populated"
        );

        Ok(PopulateResponse {
            tables,
            unpaired,
            outcome,
        })
    }

    /// Marks every game in the round published. Already published games are skipped.
    #[instrument(skip(self))]
    pub async fn publish(&self, event_slug: &str, round: u32) -> Result<BatchOutcome, AppError> {
        self.scenario(event_slug, round)?;

        let games = self.games.list_round(event_slug, round).await?;
        let repository = &self.games;
        let writes = games.into_iter().map(|mut game| async move {
            if game.published {
                return (game.attendee_id, Ok(WriteStatus::Skipped));
            }
            game.published = true;
            game.touch();
            let status = repository
                .put_game(&game)
                .await
                .map(|_| WriteStatus::Written);
            (game.attendee_id, status)
        });
        let outcome = collect_outcome(join_all(writes).await);

        info!(
            event_slug = %event_slug,
            round,
            published = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Round published"
        );

        Ok(outcome)
    }

    /// Moves attendees to corrected tables. Unchanged tables are skipped and
    /// attendees without a game this round are reported as failures.
    #[instrument(skip(self, corrections))]
    pub async fn update_tables(
        &self,
        event_slug: &str,
        round: u32,
        corrections: HashMap<String, u32>,
    ) -> Result<BatchOutcome, AppError> {
        self.scenario(event_slug, round)?;

        if corrections.values().any(|table| *table == 0) {
            return Err(AppError::BadRequest("Table numbers start at 1".to_string()));
        }

        let current: HashMap<String, PlayerGameModel> = self
            .games
            .list_round(event_slug, round)
            .await?
            .into_iter()
            .map(|g| (g.attendee_id.clone(), g))
            .collect();

        let repository = &self.games;
        let writes = corrections.into_iter().map(|(attendee_id, table)| {
            let game = current.get(&attendee_id).cloned();
            async move {
                match game {
                    None => {
                        let error = AppError::NotFound(format!(
                            "Attendee {} has no game in this round",
                            attendee_id
                        ));
                        (attendee_id, Err(error))
                    }
                    Some(game) if game.table == table => (attendee_id, Ok(WriteStatus::Skipped)),
                    Some(mut game) => {
                        debug!(attendee_id = %attendee_id, from = game.table, to = table, "Correcting table");
                        game.table = table;
                        game.touch();
                        let status = repository
                            .put_game(&game)
                            .await
                            .map(|_| WriteStatus::Written);
                        (attendee_id, status)
                    }
                }
            }
        });
        let outcome = collect_outcome(join_all(writes).await);

        info!(
            event_slug = %event_slug,
            round,
            updated = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Tables corrected"
        );

        Ok(outcome)
    }

    /// All games of the round ordered by table then attendee
    #[instrument(skip(self))]
    pub async fn get_round(&self, event_slug: &str, round: u32) -> Result<RoundResponse, AppError> {
        let scenario = self.scenario(event_slug, round)?;

        let mut games = self.games.list_round(event_slug, round).await?;
        sort_games(&mut games);

        Ok(RoundResponse {
            event_slug: event_slug.to_string(),
            round,
            scenario: scenario.id.clone(),
            state: RoundState::of(&games),
            games,
        })
    }

    /// The opponents seated at one table
    #[instrument(skip(self))]
    pub async fn get_table(
        &self,
        event_slug: &str,
        round: u32,
        table: u32,
    ) -> Result<Vec<PlayerGameModel>, AppError> {
        self.scenario(event_slug, round)?;

        let mut games = self.games.list_table(event_slug, round, table).await?;
        if games.is_empty() {
            return Err(AppError::NotFound(format!(
                "Table {} not found in round {}",
                table, round
            )));
        }
        sort_games(&mut games);
        Ok(games)
    }

    /// 404 for an attendee the event does not know, 400 for one seated elsewhere
    async fn misplaced_attendee(&self, event_slug: &str, attendee_id: &str, table: u32) -> AppError {
        match self.attendees.get_attendee(event_slug, attendee_id).await {
            Ok(Some(_)) => AppError::BadRequest(format!(
                "Attendee {} is not at table {}",
                attendee_id, table
            )),
            Ok(None) => AppError::NotFound(format!(
                "Attendee {} is not registered for {}",
                attendee_id, event_slug
            )),
            Err(e) => e,
        }
    }

    /// Merges reported results into the table's games and rescores both players.
    ///
    /// Both records are rewritten on every submission, so resubmitting repairs a
    /// table left half-written by a failed store.
    #[instrument(skip(self, submissions))]
    pub async fn submit_scores(
        &self,
        event_slug: &str,
        round: u32,
        table: u32,
        submissions: Vec<ScoreSubmission>,
    ) -> Result<Vec<PlayerGameModel>, AppError> {
        let scenario = self.scenario(event_slug, round)?;
        let bands = self.catalog.routed_bands(event_slug)?;
        let mut games = self.get_table(event_slug, round, table).await?;

        if games.iter().any(|g| g.published) {
            return Err(AppError::BadRequest(format!(
                "Results for table {} are already published",
                table
            )));
        }
        if games.len() > 2 {
            return Err(AppError::BadRequest(format!(
                "Table {} has {} players, correct the pairing first",
                table,
                games.len()
            )));
        }

        for submission in submissions {
            let Some(game) = games
                .iter_mut()
                .find(|g| g.attendee_id == submission.attendee_id)
            else {
                return Err(self
                    .misplaced_attendee(event_slug, &submission.attendee_id, table)
                    .await);
            };

            if let Some(scores) = &submission.scores {
                let unknown = scenario.unknown_inputs(scores);
                if !unknown.is_empty() {
                    return Err(AppError::BadRequest(format!(
                        "Unknown score inputs for {}: {}",
                        scenario.id,
                        unknown.join(", ")
                    )));
                }
                game.scores.get_or_insert_with(ScoreValues::new).merge(scores);
            }
            if let Some(result) = submission.result {
                game.result = Some(result);
            }
            if let Some(routed) = submission.routed_points {
                game.routed_points = Some(routed);
            }
            game.touch();
        }

        score_table(scenario, bands, &mut games);
        try_join_all(games.iter().map(|game| self.games.put_game(game))).await?;

        info!(
            event_slug = %event_slug,
            round,
            table,
            scenario = %scenario.id,
            "Scores submitted"
        );

        Ok(games)
    }
}
