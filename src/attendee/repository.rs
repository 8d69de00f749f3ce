use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::AttendeeModel;
use crate::shared::AppError;

/// Lookup of the players signed up to each event
#[async_trait]
pub trait AttendeeDirectory {
    async fn list_attendees_for_event(&self, event_slug: &str)
        -> Result<Vec<AttendeeModel>, AppError>;
    async fn get_attendee(
        &self,
        event_slug: &str,
        attendee_id: &str,
    ) -> Result<Option<AttendeeModel>, AppError>;
    async fn register_attendee(&self, attendee: &AttendeeModel) -> Result<(), AppError>;
}

/// In-memory implementation of AttendeeDirectory for development and testing
pub struct InMemoryAttendeeDirectory {
    attendees: Mutex<HashMap<String, Vec<AttendeeModel>>>, // event slug -> sign-up order
}

impl Default for InMemoryAttendeeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAttendeeDirectory {
    /// Creates a new empty directory
    pub fn new() -> Self {
        Self {
            attendees: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<AttendeeModel>>>, AppError> {
        self.attendees
            .lock()
            .map_err(|_| AppError::DatabaseError("Attendee store poisoned".to_string()))
    }
}

#[async_trait]
impl AttendeeDirectory for InMemoryAttendeeDirectory {
    #[instrument(skip(self))]
    async fn list_attendees_for_event(
        &self,
        event_slug: &str,
    ) -> Result<Vec<AttendeeModel>, AppError> {
        let attendees = self.lock()?;
        let list = attendees.get(event_slug).cloned().unwrap_or_default();
        debug!(event_slug = %event_slug, attendee_count = list.len(), "Listed attendees from memory");
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn get_attendee(
        &self,
        event_slug: &str,
        attendee_id: &str,
    ) -> Result<Option<AttendeeModel>, AppError> {
        let attendees = self.lock()?;
        Ok(attendees
            .get(event_slug)
            .and_then(|list| list.iter().find(|a| a.id == attendee_id))
            .cloned())
    }

    #[instrument(skip(self, attendee))]
    async fn register_attendee(&self, attendee: &AttendeeModel) -> Result<(), AppError> {
        debug!(event_slug = %attendee.event_slug, attendee_id = %attendee.id, "Registering attendee in memory");

        let mut attendees = self.lock()?;
        let list = attendees.entry(attendee.event_slug.clone()).or_default();
        if list.iter().any(|a| a.id == attendee.id) {
            warn!(attendee_id = %attendee.id, "Attendee already registered");
            return Err(AppError::DatabaseError(
                "Attendee already registered".to_string(),
            ));
        }
        list.push(attendee.clone());
        Ok(())
    }
}
