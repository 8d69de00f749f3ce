// Library crate for the skirmish tournament server
// This file exposes the public API for the binary and integration tests

pub mod attendee;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod round;
pub mod routes;
pub mod scenario;
pub mod shared;
pub mod standings;

// Re-export commonly used types for easier access in tests
pub use auth::{OrganiserClaims, TokenConfig, ORGANISER_ROLE};
pub use catalog::{EventConfig, TournamentCatalog};
pub use config::Settings;
pub use round::{models::PlayerGameModel, repository::PlayerGameRepository, RoundService};
pub use routes::build_router;
pub use scenario::{normalise, routed_bonus, Scenario, Variant};
pub use shared::{AppError, AppState};
pub use standings::{Standing, StandingsService};
