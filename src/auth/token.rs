use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::OrganiserClaims;
use crate::shared::AppError;

/// HS256 secret shared with whoever issues organiser tokens
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
}

impl TokenConfig {
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    /// Issues a token; the server only validates, this exists for tooling and tests
    #[instrument(skip(self, sub, role))]
    pub fn create_token(&self, sub: &str, role: &str, hours: i64) -> Result<String, AppError> {
        let exp = (Utc::now() + Duration::hours(hours)).timestamp().max(0) as usize;

        debug!(hours, exp_timestamp = exp, "Creating organiser token");

        let claims = OrganiserClaims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode organiser token");
            AppError::TokenError(e.to_string())
        })
    }

    /// Validates signature and expiry, returning the claims
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<OrganiserClaims, AppError> {
        decode::<OrganiserClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| {
            debug!(
                sub = %data.claims.sub,
                role = %data.claims.role,
                exp = data.claims.exp,
                "Organiser token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode organiser token");
            AppError::TokenError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::ORGANISER_ROLE;

    #[test]
    fn test_create_and_validate_token() {
        let config = TokenConfig::with_secret("secret");

        let token = config.create_token("td@club", ORGANISER_ROLE, 12).unwrap();
        assert!(!token.is_empty());

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "td@club");
        assert_eq!(claims.role, ORGANISER_ROLE);
        assert!(claims.exp as i64 > Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let config = TokenConfig::with_secret("secret");
        let result = config.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::TokenError(_))));
    }

    #[test]
    fn test_token_with_different_secret() {
        let issuer = TokenConfig::with_secret("one");
        let other = TokenConfig::with_secret("two");

        let token = issuer.create_token("td", ORGANISER_ROLE, 1).unwrap();

        assert!(issuer.validate_token(&token).is_ok());
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::TokenError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = TokenConfig::with_secret("secret");
        // Well past the default 60 second leeway
        let token = config.create_token("td", ORGANISER_ROLE, -2).unwrap();
        assert!(matches!(
            config.validate_token(&token),
            Err(AppError::TokenError(_))
        ));
    }
}
