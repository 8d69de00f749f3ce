use serde::{Deserialize, Serialize};

/// Cumulative results of one attendee over the published rounds of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub tournament_points: u32,
    pub routed_points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub games_played: u32,
}

/// One ranked line of the event standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: u32,
    pub attendee_id: String,
    pub name: String,
    pub faction: String,
    pub allies: Option<String>,
    pub army_list_url: Option<String>,
    pub awards: Vec<String>,
    #[serde(flatten)]
    pub totals: Totals,
}
