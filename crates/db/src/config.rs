use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

/// Database connection settings loaded from environment variables.
///
/// `DATABASE_URL` wins when present; otherwise the connection is assembled
/// from the individual `DB_*` variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: Option<String>,
    pub max_connections: u32,
}

/// An environment variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{name} must be a valid {expected}, got {value:?}")]
pub struct InvalidEnvVar {
    pub name: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "127.0.0.1".into(),
            port: 5432,
            username: "user".into(),
            password: String::new(),
            database: None,
            max_connections: 20,
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default     |
    /// |----------------------|-------------|
    /// | `DATABASE_URL`       | unset       |
    /// | `DB_HOST`            | `127.0.0.1` |
    /// | `DB_PORT`            | `5432`      |
    /// | `DB_USERNAME`        | `user`      |
    /// | `DB_PASSWORD`        | empty       |
    /// | `DB_NAME`            | unset       |
    /// | `DB_MAX_CONNECTIONS` | `20`        |
    pub fn from_env() -> Result<Self, InvalidEnvVar> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InvalidEnvVar> {
        let defaults = Self::default();
        Ok(Self {
            url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "DB_PORT", defaults.port, "port number")?,
            username: lookup("DB_USERNAME").unwrap_or(defaults.username),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").filter(|s| !s.is_empty()),
            max_connections: parse_var(
                &lookup,
                "DB_MAX_CONNECTIONS",
                defaults.max_connections,
                "u32",
            )?,
        })
    }

    /// Build driver connect options from these settings.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password);
        Ok(match &self.database {
            Some(name) => options.database(name),
            None => options,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, InvalidEnvVar> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| InvalidEnvVar {
            name,
            value,
            expected,
        }),
    }
}
