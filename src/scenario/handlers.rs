use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::models::Scenario;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the scenario catalog
///
/// GET /scenarios
/// Returns every scenario with its score inputs so forms can be rendered generically
#[instrument(name = "list_scenarios", skip(state))]
pub async fn list_scenarios(State(state): State<AppState>) -> Result<Json<Vec<Scenario>>, AppError> {
    let scenarios: Vec<Scenario> = state.catalog.scenarios().cloned().collect();
    info!(scenario_count = scenarios.len(), "Scenarios listed");
    Ok(Json(scenarios))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_list_scenarios_handler() {
        let app = Router::new()
            .route("/scenarios", axum::routing::get(list_scenarios))
            .with_state(AppStateBuilder::new().build());

        let request = Request::builder()
            .method("GET")
            .uri("/scenarios")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let scenarios: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

        let no_mans_land = scenarios
            .iter()
            .find(|s| s["id"] == "no-mans-land")
            .expect("no-mans-land should be listed");
        assert_eq!(no_mans_land["rule"]["kind"], "normalised");
        assert_eq!(no_mans_land["rule"]["variant"], "standard");
        assert_eq!(no_mans_land["score_inputs"][0]["kind"], "number");
    }
}
