// Public API - what other modules can use
pub use errors::CatalogError;
pub use handlers::{get_event, list_events};
pub use models::{EventConfig, RoundConfig};
pub use tournaments::TournamentCatalog;

// Internal modules
mod errors;
mod handlers;
mod models;
mod tournaments;
