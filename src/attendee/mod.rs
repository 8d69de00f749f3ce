// Public API - what other modules can use
pub use handlers::{list_attendees, register_attendee};
pub use types::{RegisterAttendeeRequest, MAX_AWARDS};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod types;
