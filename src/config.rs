use anyhow::Context;
use dotenvy::dotenv;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::fmt;

/// The API always listens on this port.
pub const SERVER_PORT: u16 = 8080;

#[derive(Clone)]
pub struct Config {
    pub server_port: u16,
    pub database: DatabaseConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let port = match lookup("PG_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PG_PORT is not a valid port: {raw:?}"))?,
            None => 5432,
        };

        let database = DatabaseConfig {
            host: required("PG_HOST")?,
            port,
            user: required("PG_USER")?,
            password: lookup("PG_PASSWORD").unwrap_or_default(),
            name: required("PG_DB")?,
            ssl_mode: lookup("PG_SSL").unwrap_or_else(|| "prefer".to_string()),
        };
        // Fail on a bad ssl mode here rather than at connect time.
        database.parse_ssl_mode()?;

        Ok(Config {
            server_port: SERVER_PORT,
            database,
        })
    }
}

impl DatabaseConfig {
    fn parse_ssl_mode(&self) -> anyhow::Result<PgSslMode> {
        self.ssl_mode
            .parse()
            .with_context(|| format!("PG_SSL is not a valid ssl mode: {:?}", self.ssl_mode))
    }

    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.parse_ssl_mode()?))
    }

    /// libpq-style connection string with the password masked, for logs.
    pub fn redacted_connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password=**** dbname={} sslmode={}",
            self.host, self.port, self.user, self.name, self.ssl_mode
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted_connection_string())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("database", &self.database)
            .finish()
    }
}
