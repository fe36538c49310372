use chrono::{DateTime, Duration, Timelike, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::{DatabaseError, Store};

/// JWT claims carried by every bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub unique_name: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    InvalidRequest,

    // Same message for unknown user and wrong password
    #[error("Invalid username or password")]
    Unauthorized,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// A freshly minted token and its validity window
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Upper bound on JWT_EXPIRES_IN_MINUTES (one year)
pub const MAX_LIFETIME_MINUTES: i64 = 60 * 24 * 365;

/// Signs and verifies HS256 tokens with the server-held key
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        if security.jwt_key.is_empty() {
            return Err(AuthError::TokenGeneration("JWT key is not configured".to_string()));
        }
        if !(1..=MAX_LIFETIME_MINUTES).contains(&security.jwt_expires_in_minutes) {
            return Err(AuthError::TokenGeneration(format!(
                "token lifetime must be between 1 and {} minutes, got {}",
                MAX_LIFETIME_MINUTES, security.jwt_expires_in_minutes
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in verify_at against the caller's clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[security.jwt_issuer.as_str()]);
        validation.set_audience(&[security.jwt_audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(security.jwt_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_key.as_bytes()),
            validation,
            issuer: security.jwt_issuer.clone(),
            audience: security.jwt_audience.clone(),
            lifetime: Duration::minutes(security.jwt_expires_in_minutes),
        })
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn issue(&self, username: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(username, Utc::now())
    }

    /// Mint a token as of `now`. JWT timestamps are whole seconds, so the
    /// reported window is truncated the same way.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let issued_at = now.with_nanosecond(0).unwrap_or(now);
        let expires_at = issued_at
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AuthError::TokenGeneration("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            unique_name: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))?;

        Ok(IssuedToken {
            token,
            subject: username.to_string(),
            issued_at,
            expires_at,
        })
    }

    /// Check signature, issuer, audience and expiry. No lookup is involved.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify as of `now`. A token is valid only while `now < exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::InvalidToken("ExpiredSignature".to_string()));
        }
        Ok(claims)
    }
}

/// Validate a credential pair against the users table and mint a token
pub async fn authenticate(
    store: &dyn Store,
    issuer: &TokenIssuer,
    username: &str,
    password: &str,
) -> Result<IssuedToken, AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidRequest);
    }

    let user = match store.find_user_by_credentials(username, password).await? {
        Some(user) => user,
        None => {
            warn!("Login rejected for '{}'", username);
            return Err(AuthError::Unauthorized);
        }
    };

    let issued = issuer.issue(&user.username)?;
    info!("Issued token for '{}' expiring at {}", user.username, issued.expires_at);
    Ok(issued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::testing::TestContext;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AppConfig::development().security).unwrap()
    }

    #[test]
    fn token_expires_after_configured_minutes() {
        let issued = issuer().issue("admin").unwrap();
        assert_eq!(issued.subject, "admin");
        assert_eq!(issued.expires_at - issued.issued_at, Duration::minutes(120));

        let claims = issuer().verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert_eq!(claims.iss, "StudentManagementAPI");
    }

    #[test]
    fn custom_lifetime_is_honoured() {
        let mut security = AppConfig::development().security;
        security.jwt_expires_in_minutes = 5;
        let issued = TokenIssuer::new(&security).unwrap().issue("user").unwrap();
        assert_eq!(issued.expires_at - issued.issued_at, Duration::minutes(5));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let long_ago = Utc::now() - Duration::hours(3);
        let issued = issuer.issue_at("admin", long_ago).unwrap();
        assert!(matches!(issuer.verify(&issued.token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let mut security = AppConfig::development().security;
        security.jwt_key = "another-secret-key-that-is-long-enough-for-hs256".to_string();
        let foreign = TokenIssuer::new(&security).unwrap().issue("admin").unwrap();
        assert!(issuer().verify(&foreign.token).is_err());
        assert!(issuer().verify("not.a.token").is_err());
    }

    #[test]
    fn token_is_rejected_at_its_expiry_second() {
        let issuer = issuer();
        let now = Utc::now().with_nanosecond(0).unwrap();
        let issued = issuer.issue_at("admin", now - issuer.lifetime()).unwrap();
        assert_eq!(issued.expires_at, now);

        assert!(matches!(issuer.verify_at(&issued.token, now), Err(AuthError::InvalidToken(_))));
        assert!(issuer.verify_at(&issued.token, now - Duration::seconds(1)).is_ok());
        assert!(issuer.verify(&issued.token).is_err());
    }

    #[test]
    fn rejects_out_of_range_lifetime() {
        let mut security = AppConfig::development().security;
        security.jwt_expires_in_minutes = 0;
        assert!(TokenIssuer::new(&security).is_err());

        security.jwt_expires_in_minutes = MAX_LIFETIME_MINUTES + 1;
        assert!(TokenIssuer::new(&security).is_err());

        security.jwt_expires_in_minutes = i64::MAX;
        assert!(TokenIssuer::new(&security).is_err());

        security.jwt_expires_in_minutes = MAX_LIFETIME_MINUTES;
        assert!(TokenIssuer::new(&security).is_ok());
    }

    #[test]
    fn expiry_overflow_is_a_generation_error() {
        let mut security = AppConfig::development().security;
        security.jwt_expires_in_minutes = MAX_LIFETIME_MINUTES;
        let issuer = TokenIssuer::new(&security).unwrap();
        assert!(matches!(
            issuer.issue_at("admin", DateTime::<Utc>::MAX_UTC),
            Err(AuthError::TokenGeneration(_))
        ));
    }

    #[tokio::test]
    async fn authenticates_seeded_users() {
        let ctx = TestContext::seeded().await;
        let issued = authenticate(ctx.store(), &ctx.issuer, "admin", "admin123").await.unwrap();
        assert_eq!(issued.subject, "admin");
        assert!(!issued.token.is_empty());
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let ctx = TestContext::seeded().await;
        let wrong_password = authenticate(ctx.store(), &ctx.issuer, "admin", "wrong").await.unwrap_err();
        let unknown_user = authenticate(ctx.store(), &ctx.issuer, "nobody", "admin123").await.unwrap_err();
        let wrong_case = authenticate(ctx.store(), &ctx.issuer, "ADMIN", "admin123").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::Unauthorized));
        assert!(matches!(unknown_user, AuthError::Unauthorized));
        assert!(matches!(wrong_case, AuthError::Unauthorized));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn empty_fields_are_invalid_requests() {
        let ctx = TestContext::seeded().await;
        assert!(matches!(
            authenticate(ctx.store(), &ctx.issuer, "", "admin123").await,
            Err(AuthError::InvalidRequest)
        ));
        assert!(matches!(
            authenticate(ctx.store(), &ctx.issuer, "admin", "").await,
            Err(AuthError::InvalidRequest)
        ));
    }
}
