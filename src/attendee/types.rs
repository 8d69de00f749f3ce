use serde::Deserialize;

pub const MAX_AWARDS: usize = 3;

/// Request payload for signing up to an event
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAttendeeRequest {
    pub name: String,
    pub faction: String,
    #[serde(default)]
    pub allies: Option<String>,
    #[serde(default)]
    pub army_list_url: Option<String>,
    #[serde(default)]
    pub awards: Vec<String>,
}
