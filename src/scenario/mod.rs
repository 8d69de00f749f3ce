// Public API - what other modules can use
pub use builtin::builtin_scenarios;
pub use handlers::list_scenarios;
pub use inputs::{ScoreInput, ScoreInputKind, ScoreValues};
pub use models::Scenario;
pub use normalise::{normalise, routed_bonus, RoutedBand, Variant, STANDARD_ROUTED_BANDS};
pub use rules::{ScoringRule, Weight};

// Internal modules
mod builtin;
mod handlers;
mod inputs;
mod models;
mod normalise;
mod rules;
