use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::{GameResult, PlayerGameModel};
use crate::scenario::ScoreValues;
use crate::shared::AppError;

/// Result of a conditional insert keyed by (event, round, attendee)
#[derive(Debug, Clone)]
pub enum CreateGameResult {
    /// No record existed, the new one was stored
    Created(PlayerGameModel),
    /// The attendee already had a game this round; the stored record is returned unchanged
    AlreadyExists(PlayerGameModel),
}

/// Trait for player game persistence.
///
/// Games are partitioned by (event, round) and keyed by attendee within the
/// partition; `list_table` is the by-table secondary lookup.
#[async_trait]
pub trait PlayerGameRepository {
    /// Inserts the game unless the attendee already has one for the round
    async fn create_game(&self, game: &PlayerGameModel) -> Result<CreateGameResult, AppError>;
    /// Inserts or replaces the game
    async fn put_game(&self, game: &PlayerGameModel) -> Result<(), AppError>;
    async fn get_game(
        &self,
        event_slug: &str,
        round: u32,
        attendee_id: &str,
    ) -> Result<Option<PlayerGameModel>, AppError>;
    async fn list_round(&self, event_slug: &str, round: u32)
        -> Result<Vec<PlayerGameModel>, AppError>;
    async fn list_table(
        &self,
        event_slug: &str,
        round: u32,
        table: u32,
    ) -> Result<Vec<PlayerGameModel>, AppError>;
    async fn list_event(&self, event_slug: &str) -> Result<Vec<PlayerGameModel>, AppError>;
}

type Partitions = HashMap<(String, u32), BTreeMap<String, PlayerGameModel>>;

/// In-memory implementation of PlayerGameRepository for development and testing
pub struct InMemoryPlayerGameRepository {
    partitions: Mutex<Partitions>,
}

impl Default for InMemoryPlayerGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerGameRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            partitions: Mutex::new(HashMap::new()),
        }
    }

    /// Total number of stored games across all events (useful for tests)
    pub fn game_count(&self) -> usize {
        self.partitions
            .lock()
            .map(|p| p.values().map(BTreeMap::len).sum())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Partitions>, AppError> {
        self.partitions
            .lock()
            .map_err(|_| AppError::DatabaseError("Game store poisoned".to_string()))
    }
}

#[async_trait]
impl PlayerGameRepository for InMemoryPlayerGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &PlayerGameModel) -> Result<CreateGameResult, AppError> {
        debug!(
            event_slug = %game.event_slug,
            round = game.round,
            table = game.table,
            attendee_id = %game.attendee_id,
            "Creating game in memory"
        );

        let mut partitions = self.lock()?;
        let partition = partitions
            .entry((game.event_slug.clone(), game.round))
            .or_default();

        if let Some(existing) = partition.get(&game.attendee_id) {
            warn!(attendee_id = %game.attendee_id, "Attendee already has a game this round");
            return Ok(CreateGameResult::AlreadyExists(existing.clone()));
        }

        partition.insert(game.attendee_id.clone(), game.clone());
        Ok(CreateGameResult::Created(game.clone()))
    }

    #[instrument(skip(self, game))]
    async fn put_game(&self, game: &PlayerGameModel) -> Result<(), AppError> {
        debug!(
            event_slug = %game.event_slug,
            round = game.round,
            attendee_id = %game.attendee_id,
            "Storing game in memory"
        );

        let mut partitions = self.lock()?;
        partitions
            .entry((game.event_slug.clone(), game.round))
            .or_default()
            .insert(game.attendee_id.clone(), game.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(
        &self,
        event_slug: &str,
        round: u32,
        attendee_id: &str,
    ) -> Result<Option<PlayerGameModel>, AppError> {
        let partitions = self.lock()?;
        Ok(partitions
            .get(&(event_slug.to_string(), round))
            .and_then(|p| p.get(attendee_id))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn list_round(
        &self,
        event_slug: &str,
        round: u32,
    ) -> Result<Vec<PlayerGameModel>, AppError> {
        let partitions = self.lock()?;
        let games: Vec<PlayerGameModel> = partitions
            .get(&(event_slug.to_string(), round))
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default();
        debug!(event_slug = %event_slug, round, game_count = games.len(), "Listed round from memory");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn list_table(
        &self,
        event_slug: &str,
        round: u32,
        table: u32,
    ) -> Result<Vec<PlayerGameModel>, AppError> {
        let partitions = self.lock()?;
        Ok(partitions
            .get(&(event_slug.to_string(), round))
            .map(|p| p.values().filter(|g| g.table == table).cloned().collect())
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn list_event(&self, event_slug: &str) -> Result<Vec<PlayerGameModel>, AppError> {
        let partitions = self.lock()?;
        Ok(partitions
            .iter()
            .filter(|((slug, _), _)| slug == event_slug)
            .flat_map(|(_, p)| p.values().cloned())
            .collect())
    }
}

/// PostgreSQL implementation of PlayerGameRepository.
/// Expects the `player_games` table from `migrations/`.
pub struct PostgresPlayerGameRepository {
    pool: PgPool,
}

const GAME_COLUMNS: &str = "event_slug, round_index, table_number, attendee_id, published, \
     result, routed_points, scores, scenario_points, total_score, updated_at";

impl PostgresPlayerGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: impl std::fmt::Display) -> AppError {
    AppError::DatabaseError(e.to_string())
}

fn to_db_int(value: u32) -> Result<i32, AppError> {
    i32::try_from(value).map_err(db_error)
}

fn from_db_int(value: i32) -> Result<u32, AppError> {
    u32::try_from(value).map_err(db_error)
}

fn game_from_row(row: &PgRow) -> Result<PlayerGameModel, AppError> {
    let result: Option<String> = row.try_get("result").map_err(db_error)?;
    let scores: Option<String> = row.try_get("scores").map_err(db_error)?;
    let routed_points: Option<i32> = row.try_get("routed_points").map_err(db_error)?;
    let scenario_points: Option<i32> = row.try_get("scenario_points").map_err(db_error)?;
    let total_score: Option<i32> = row.try_get("total_score").map_err(db_error)?;

    Ok(PlayerGameModel {
        event_slug: row.try_get("event_slug").map_err(db_error)?,
        round: from_db_int(row.try_get("round_index").map_err(db_error)?)?,
        table: from_db_int(row.try_get("table_number").map_err(db_error)?)?,
        attendee_id: row.try_get("attendee_id").map_err(db_error)?,
        published: row.try_get("published").map_err(db_error)?,
        result: result
            .map(|r| GameResult::from_str(&r).map_err(db_error))
            .transpose()?,
        routed_points: routed_points.map(from_db_int).transpose()?,
        scores: scores
            .map(|s| serde_json::from_str::<ScoreValues>(&s).map_err(db_error))
            .transpose()?,
        scenario_points: scenario_points.map(from_db_int).transpose()?,
        total_score: total_score.map(from_db_int).transpose()?,
        updated_at: row.try_get("updated_at").map_err(db_error)?,
    })
}

struct GameParams {
    round: i32,
    table: i32,
    result: Option<String>,
    routed_points: Option<i32>,
    scores: Option<String>,
    scenario_points: Option<i32>,
    total_score: Option<i32>,
}

impl GameParams {
    fn from_game(game: &PlayerGameModel) -> Result<Self, AppError> {
        Ok(Self {
            round: to_db_int(game.round)?,
            table: to_db_int(game.table)?,
            result: game.result.map(|r| r.to_string()),
            routed_points: game.routed_points.map(to_db_int).transpose()?,
            scores: game
                .scores
                .as_ref()
                .map(|s| serde_json::to_string(s).map_err(db_error))
                .transpose()?,
            scenario_points: game.scenario_points.map(to_db_int).transpose()?,
            total_score: game.total_score.map(to_db_int).transpose()?,
        })
    }
}

#[async_trait]
impl PlayerGameRepository for PostgresPlayerGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &PlayerGameModel) -> Result<CreateGameResult, AppError> {
        debug!(attendee_id = %game.attendee_id, round = game.round, "Creating game in database");

        let params = GameParams::from_game(game)?;
        let query = format!(
            "INSERT INTO player_games ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (event_slug, round_index, attendee_id) DO NOTHING",
            GAME_COLUMNS
        );
        let result = sqlx::query(&query)
            .bind(&game.event_slug)
            .bind(params.round)
            .bind(params.table)
            .bind(&game.attendee_id)
            .bind(game.published)
            .bind(params.result)
            .bind(params.routed_points)
            .bind(params.scores)
            .bind(params.scenario_points)
            .bind(params.total_score)
            .bind(game.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, attendee_id = %game.attendee_id, "Failed to insert game");
                db_error(e)
            })?;

        if result.rows_affected() == 0 {
            let existing = self
                .get_game(&game.event_slug, game.round, &game.attendee_id)
                .await?
                .ok_or(AppError::Internal)?;
            return Ok(CreateGameResult::AlreadyExists(existing));
        }

        Ok(CreateGameResult::Created(game.clone()))
    }

    #[instrument(skip(self, game))]
    async fn put_game(&self, game: &PlayerGameModel) -> Result<(), AppError> {
        debug!(attendee_id = %game.attendee_id, round = game.round, "Storing game in database");

        let params = GameParams::from_game(game)?;
        let query = format!(
            "INSERT INTO player_games ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (event_slug, round_index, attendee_id) DO UPDATE SET \
             table_number = EXCLUDED.table_number, published = EXCLUDED.published, \
             result = EXCLUDED.result, routed_points = EXCLUDED.routed_points, \
             scores = EXCLUDED.scores, scenario_points = EXCLUDED.scenario_points, \
             total_score = EXCLUDED.total_score, updated_at = EXCLUDED.updated_at",
            GAME_COLUMNS
        );
        sqlx::query(&query)
            .bind(&game.event_slug)
            .bind(params.round)
            .bind(params.table)
            .bind(&game.attendee_id)
            .bind(game.published)
            .bind(params.result)
            .bind(params.routed_points)
            .bind(params.scores)
            .bind(params.scenario_points)
            .bind(params.total_score)
            .bind(game.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, attendee_id = %game.attendee_id, "Failed to store game");
                db_error(e)
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(
        &self,
        event_slug: &str,
        round: u32,
        attendee_id: &str,
    ) -> Result<Option<PlayerGameModel>, AppError> {
        let query = format!(
            "SELECT {} FROM player_games \
             WHERE event_slug = $1 AND round_index = $2 AND attendee_id = $3",
            GAME_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(event_slug)
            .bind(to_db_int(round)?)
            .bind(attendee_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(game_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_round(
        &self,
        event_slug: &str,
        round: u32,
    ) -> Result<Vec<PlayerGameModel>, AppError> {
        let query = format!(
            "SELECT {} FROM player_games WHERE event_slug = $1 AND round_index = $2",
            GAME_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(event_slug)
            .bind(to_db_int(round)?)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(game_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_table(
        &self,
        event_slug: &str,
        round: u32,
        table: u32,
    ) -> Result<Vec<PlayerGameModel>, AppError> {
        let query = format!(
            "SELECT {} FROM player_games \
             WHERE event_slug = $1 AND round_index = $2 AND table_number = $3",
            GAME_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(event_slug)
            .bind(to_db_int(round)?)
            .bind(to_db_int(table)?)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(game_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_event(&self, event_slug: &str) -> Result<Vec<PlayerGameModel>, AppError> {
        let query = format!("SELECT {} FROM player_games WHERE event_slug = $1", GAME_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(event_slug)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(game_from_row).collect()
    }
}
