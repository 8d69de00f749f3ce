use serde::{Deserialize, Serialize};

/// Role an organiser token must carry
pub const ORGANISER_ROLE: &str = "organiser";

/// JWT claims issued to event organisers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganiserClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
}

impl OrganiserClaims {
    pub fn is_organiser(&self) -> bool {
        self.role == ORGANISER_ROLE
    }
}
