// Public API - what other modules can use
pub use csv::{escape_cell, render_results_csv};
pub use handlers::{export_results, get_standings};
pub use models::{Standing, Totals};
pub use service::{tally, StandingsService};

// Internal modules
mod csv;
mod handlers;
mod models;
mod service;
