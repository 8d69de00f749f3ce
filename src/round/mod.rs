// Public API - what other modules can use
pub use handlers::{get_round, get_table, populate_round, publish_round, submit_scores, update_tables};
pub use service::{score_table, RoundService};
pub use types::{
    BatchOutcome, FailedWrite, PopulateResponse, RoundResponse, ScoreSubmission,
    SubmitScoresRequest, TableCorrectionsRequest,
};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
mod types;
