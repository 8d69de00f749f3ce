use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::PlayerGameModel,
    service::RoundService,
    types::{
        BatchOutcome, PopulateResponse, RoundResponse, SubmitScoresRequest,
        TableCorrectionsRequest,
    },
};
use crate::shared::{AppError, AppState};

fn parse_index(segment: &str, what: &str) -> Result<u32, AppError> {
    segment.parse().map_err(|_| {
        AppError::BadRequest(format!(
            "{} must be a non-negative integer, got {:?}",
            what, segment
        ))
    })
}

/// HTTP handler pairing unassigned attendees for a round (organiser only)
///
/// POST /events/{slug}/rounds/{round}/populate
#[instrument(name = "populate_round", skip(state))]
pub async fn populate_round(
    State(state): State<AppState>,
    Path((slug, round)): Path<(String, String)>,
) -> Result<Json<PopulateResponse>, AppError> {
    let round = parse_index(&round, "round")?;
    info!(event_slug = %slug, round, "Populating round");

    let service = RoundService::from_state(&state);
    Ok(Json(service.populate(&slug, round).await?))
}

/// HTTP handler publishing every game of a round (organiser only)
///
/// POST /events/{slug}/rounds/{round}/publish
#[instrument(name = "publish_round", skip(state))]
pub async fn publish_round(
    State(state): State<AppState>,
    Path((slug, round)): Path<(String, String)>,
) -> Result<Json<BatchOutcome>, AppError> {
    let round = parse_index(&round, "round")?;
    info!(event_slug = %slug, round, "Publishing round");

    let service = RoundService::from_state(&state);
    Ok(Json(service.publish(&slug, round).await?))
}

/// HTTP handler correcting table assignments (organiser only)
///
/// PUT /events/{slug}/rounds/{round}/tables
#[instrument(name = "update_tables", skip(state, request))]
pub async fn update_tables(
    State(state): State<AppState>,
    Path((slug, round)): Path<(String, String)>,
    Json(request): Json<TableCorrectionsRequest>,
) -> Result<Json<BatchOutcome>, AppError> {
    let round = parse_index(&round, "round")?;
    info!(event_slug = %slug, round, corrections = request.tables.len(), "Correcting tables");

    let service = RoundService::from_state(&state);
    Ok(Json(service.update_tables(&slug, round, request.tables).await?))
}

/// HTTP handler listing a round's games in table order
///
/// GET /events/{slug}/rounds/{round}
#[instrument(name = "get_round", skip(state))]
pub async fn get_round(
    State(state): State<AppState>,
    Path((slug, round)): Path<(String, String)>,
) -> Result<Json<RoundResponse>, AppError> {
    let round = parse_index(&round, "round")?;
    let service = RoundService::from_state(&state);
    Ok(Json(service.get_round(&slug, round).await?))
}

/// HTTP handler returning the opponents at one table
///
/// GET /events/{slug}/rounds/{round}/tables/{table}
#[instrument(name = "get_table", skip(state))]
pub async fn get_table(
    State(state): State<AppState>,
    Path((slug, round, table)): Path<(String, String, String)>,
) -> Result<Json<Vec<PlayerGameModel>>, AppError> {
    let round = parse_index(&round, "round")?;
    let table = parse_index(&table, "table")?;
    let service = RoundService::from_state(&state);
    Ok(Json(service.get_table(&slug, round, table).await?))
}

/// HTTP handler recording reported results for a table
///
/// POST /events/{slug}/rounds/{round}/tables/{table}/scores
#[instrument(name = "submit_scores", skip(state, request))]
pub async fn submit_scores(
    State(state): State<AppState>,
    Path((slug, round, table)): Path<(String, String, String)>,
    Json(request): Json<SubmitScoresRequest>,
) -> Result<Json<Vec<PlayerGameModel>>, AppError> {
    let round = parse_index(&round, "round")?;
    let table = parse_index(&table, "table")?;
    info!(
        event_slug = %slug,
        round,
        table,
        submissions = request.submissions.len(),
        "Submitting scores"
    );

    let service = RoundService::from_state(&state);
    Ok(Json(
        service
            .submit_scores(&slug, round, table, request.submissions)
            .await?,
    ))
}
