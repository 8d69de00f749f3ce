use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::AttendeeModel,
    types::{RegisterAttendeeRequest, MAX_AWARDS},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for signing up to an event
///
/// POST /events/{slug}/attendees
#[instrument(name = "register_attendee", skip(state, request))]
pub async fn register_attendee(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<RegisterAttendeeRequest>,
) -> Result<Json<AttendeeModel>, AppError> {
    state.catalog.event(&slug)?;

    if request.awards.len() > MAX_AWARDS {
        return Err(AppError::BadRequest(format!(
            "At most {} awards per attendee",
            MAX_AWARDS
        )));
    }

    let attendee = AttendeeModel::new(&slug, request);
    state.attendee_directory.register_attendee(&attendee).await?;

    info!(
        event_slug = %slug,
        attendee_id = %attendee.id,
        name = %attendee.name,
        "Attendee registered"
    );

    Ok(Json(attendee))
}

/// HTTP handler for listing an event's attendees
///
/// GET /events/{slug}/attendees
#[instrument(name = "list_attendees", skip(state))]
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<AttendeeModel>>, AppError> {
    state.catalog.event(&slug)?;
    let attendees = state.attendee_directory.list_attendees_for_event(&slug).await?;
    Ok(Json(attendees))
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

    fn app() -> Router {
        Router::new()
            .route(
                "/events/:slug/attendees",
                axum::routing::get(list_attendees).post(register_attendee),
            )
            .with_state(AppStateBuilder::new().build())
    }

    fn register(slug: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/events/{}/attendees", slug))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_list() {
        let app = app();

        let response = app
            .clone()
            .oneshot(register(
                "club-open",
                r#"{"name": "Alice", "faction": "Wood Elves", "awards": ["Best Painted"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/events/club-open/attendees")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let attendees: Vec<AttendeeModel> = serde_json::from_slice(&body).unwrap();

        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].name, "Alice");
        assert_eq!(attendees[0].awards, vec!["Best Painted".to_string()]);
    }

    #[tokio::test]
    async fn test_register_for_unknown_event_is_not_found() {
        let response = app()
            .oneshot(register("missing", r#"{"name": "Alice", "faction": "Orcs"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_too_many_awards_is_bad_request() {
        let response = app()
            .oneshot(register(
                "club-open",
                r#"{"name": "Alice", "faction": "Orcs", "awards": ["a", "b", "c", "d"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
