use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Lifetime of an issued credential, in seconds.
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// Message returned when the path owner differs from the credential owner.
pub const OWNER_MISMATCH: &str = "unauthorized access";

/// Decoded credential payload.
///
/// `extra` keeps whatever else the client asked to have signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Claims for `email` issued at `now`, expiring one day later.
    pub fn new(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            extra: Map::new(),
        }
    }

    /// Attach additional fields; reserved keys are ignored.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra
            .into_iter()
            .filter(|(k, _)| !matches!(k.as_str(), "email" | "iat" | "exp"))
            .collect();
        self
    }
}

/// Handler-level ownership check run after the guard has verified the credential.
pub fn authorize_owner(claims: &Claims, email: &str) -> Result<(), AppError> {
    if claims.email == email {
        Ok(())
    } else {
        tracing::debug!(claimed = %claims.email, requested = %email, "owner mismatch");
        Err(AppError::Forbidden(OWNER_MISMATCH.to_string()))
    }
}
