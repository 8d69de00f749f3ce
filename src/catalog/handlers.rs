use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::EventConfig;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing configured events
///
/// GET /events
#[instrument(name = "list_events", skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventConfig>>, AppError> {
    let events = state.catalog.events().to_vec();
    info!(event_count = events.len(), "Events listed");
    Ok(Json(events))
}

/// HTTP handler for a single event
///
/// GET /events/{slug}
#[instrument(name = "get_event", skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventConfig>, AppError> {
    let event = state.catalog.event(&slug)?;
    Ok(Json(event.clone()))
}
