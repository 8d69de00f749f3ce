use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::{attendee, auth, catalog, round, scenario, shared::AppState, standings};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full HTTP surface. Pairing and publishing sit behind organiser auth.
pub fn build_router(state: AppState) -> Router {
    let organiser_routes = Router::new()
        .route(
            "/events/:slug/rounds/:round/populate",
            post(round::populate_round),
        )
        .route(
            "/events/:slug/rounds/:round/publish",
            post(round::publish_round),
        )
        .route(
            "/events/:slug/rounds/:round/tables",
            put(round::update_tables),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::organiser_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/scenarios", get(scenario::list_scenarios))
        .route("/events", get(catalog::list_events))
        .route("/events/:slug", get(catalog::get_event))
        .route(
            "/events/:slug/attendees",
            get(attendee::list_attendees).post(attendee::register_attendee),
        )
        .route("/events/:slug/rounds/:round", get(round::get_round))
        .route(
            "/events/:slug/rounds/:round/tables/:table",
            get(round::get_table),
        )
        .route(
            "/events/:slug/rounds/:round/tables/:table/scores",
            post(round::submit_scores),
        )
        .route("/events/:slug/standings", get(standings::get_standings))
        .route("/events/:slug/results.csv", get(standings::export_results))
        .merge(organiser_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
