use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::RegisterAttendeeRequest;

/// A player signed up to one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeModel {
    pub id: String, // UUID v4 as string
    pub event_slug: String,
    pub name: String,
    pub faction: String,
    pub allies: Option<String>,
    pub army_list_url: Option<String>,
    pub awards: Vec<String>, // At most three
    pub registered_at: DateTime<Utc>,
}

impl AttendeeModel {
    /// Creates a new attendee with a generated ID
    pub fn new(event_slug: &str, request: RegisterAttendeeRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_slug: event_slug.to_string(),
            name: request.name,
            faction: request.faction,
            allies: request.allies,
            army_list_url: request.army_list_url,
            awards: request.awards,
            registered_at: Utc::now(),
        }
    }
}
