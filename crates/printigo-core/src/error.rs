use thiserror::Error;

/// Application-wide error types for Printigo.
#[derive(Error, Debug)]
pub enum AppError {
    /// A path identifier could not be parsed into a record key.
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// A request body was missing, not JSON, or not the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No credential was presented on a protected route.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to see the resource.
    #[error("{0}")]
    Forbidden(String),

    /// A bearer credential failed signature, expiry, or claim checks.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Signing a credential failed.
    #[error("Token error: {0}")]
    TokenError(String),

    /// A stored document could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
