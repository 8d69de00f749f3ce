#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::{TestSetup, EVENT};

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the router, returning status and raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let (status, body) = self
            .send(builder.body(Body::from(body.to_string())).unwrap())
            .await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Register an attendee and return its id
    pub async fn register(&self, name: &str) -> String {
        let (status, body) = self
            .send_json(
                "POST",
                &format!("/events/{}/attendees", EVENT),
                json!({ "name": name, "faction": "Dwarfs" }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registering {}", name);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn populate(&self, round: u32) -> (StatusCode, Value) {
        self.send_json(
            "POST",
            &format!("/events/{}/rounds/{}/populate", EVENT, round),
            json!({}),
            Some(&self.organiser_token),
        )
        .await
    }

    pub async fn publish(&self, round: u32) -> (StatusCode, Value) {
        self.send_json(
            "POST",
            &format!("/events/{}/rounds/{}/publish", EVENT, round),
            json!({}),
            Some(&self.organiser_token),
        )
        .await
    }

    pub async fn round(&self, round: u32) -> Value {
        let (status, body) = self
            .get_json(&format!("/events/{}/rounds/{}", EVENT, round))
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// Attendee ids seated at `table`, in id order
    pub async fn table(&self, round: u32, table: u32) -> Vec<String> {
        let (status, body) = self
            .get_json(&format!("/events/{}/rounds/{}/tables/{}", EVENT, round, table))
            .await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .unwrap()
            .iter()
            .map(|game| game["attendee_id"].as_str().unwrap().to_string())
            .collect()
    }

    pub async fn submit(&self, round: u32, table: u32, submissions: Value) -> (StatusCode, Value) {
        self.send_json(
            "POST",
            &format!("/events/{}/rounds/{}/tables/{}/scores", EVENT, round, table),
            json!({ "submissions": submissions }),
            None,
        )
        .await
    }
}
