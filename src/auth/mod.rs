// Public API - what other modules can use
pub use middleware::organiser_auth;
pub use token::TokenConfig;
pub use types::{OrganiserClaims, ORGANISER_ROLE};

// Internal modules
mod middleware;
mod token;
mod types;
