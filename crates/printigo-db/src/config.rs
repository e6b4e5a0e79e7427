use printigo_core::AppError;

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Read configuration from environment variables.
    ///
    /// - `DATABASE_URL`, or `DB_USER` + `DB_PASS` (with optional `DB_HOST`,
    ///   default `localhost:5432`, and `DB_NAME`, default `printigo`)
    /// - `DATABASE_MAX_CONNECTIONS` (optional, defaults to 5)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DatabaseConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let (Some(user), Some(pass)) = (lookup("DB_USER"), lookup("DB_PASS")) else {
                    return Err(AppError::ConfigError(
                        "DATABASE_URL not set, and DB_USER/DB_PASS are missing".into(),
                    ));
                };
                let host = lookup("DB_HOST").unwrap_or_else(|| "localhost:5432".to_string());
                let name = lookup("DB_NAME").unwrap_or_else(|| "printigo".to_string());
                format!("postgresql://{user}:{pass}@{host}/{name}")
            }
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => 5,
            Some(raw) => {
                let parsed: u32 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid DATABASE_MAX_CONNECTIONS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}
