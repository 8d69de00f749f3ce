use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use super::{csv::render_results_csv, models::Standing, service::StandingsService};
use crate::shared::{AppError, AppState};

/// HTTP handler for event standings
///
/// GET /events/{slug}/standings
#[instrument(name = "get_standings", skip(state))]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Standing>>, AppError> {
    let service = StandingsService::from_state(&state);
    Ok(Json(service.standings(&slug).await?))
}

/// HTTP handler for the results submission file
///
/// GET /events/{slug}/results.csv
#[instrument(name = "export_results", skip(state))]
pub async fn export_results(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = StandingsService::from_state(&state);
    let standings = service.standings(&slug).await?;
    let body = render_results_csv(&standings);

    info!(event_slug = %slug, rows = standings.len(), "Results exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}-results.csv\"", slug),
            ),
        ],
        body,
    ))
}
