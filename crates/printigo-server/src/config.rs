use printigo_core::AppError;

const DEFAULT_PORT: u16 = 5000;

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// HMAC secret used to sign and verify bearer credentials.
    pub token_secret: String,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `ACCESS_TOKEN_SECRET` (required, non-empty)
    /// - `PORT` (optional, defaults to 5000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let token_secret = lookup("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::ConfigError("ACCESS_TOKEN_SECRET must be set".into()))?;

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid PORT '{raw}': must be a port number"))
            })?,
        };

        Ok(Self { port, token_secret })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
