use std::path::PathBuf;

use crate::shared::AppError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Process settings read from the environment at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub organiser_token_secret: String,
    /// Selects the PostgreSQL game repository when present
    pub database_url: Option<String>,
    /// JSON list of events; the demo catalog is used when absent
    pub events_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let organiser_token_secret = present("ORGANISER_TOKEN_SECRET").ok_or_else(|| {
            AppError::Config("ORGANISER_TOKEN_SECRET must be set".to_string())
        })?;

        Ok(Self {
            bind_address: present("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            organiser_token_secret,
            database_url: present("DATABASE_URL"),
            events_file: present("EVENTS_FILE").map(PathBuf::from),
        })
    }
}
