use std::env;

use duckds_core::{
    config::{self, DataSourceConfig},
    err::{bail, Context, Result},
};
use serde::{Deserialize, Serialize};

/// Key of the MotherDuck token within the secure settings
pub const MOTHERDUCK_TOKEN_KEY: &str = "motherDuckToken";

/// Environment variable read by the motherduck extension
pub const MOTHERDUCK_TOKEN_ENV: &str = "motherduck_token";

/// Prefix of MotherDuck (cloud) database strings
pub const MOTHERDUCK_PREFIX: &str = "md:";

/// The connection config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DuckDbConnectionConfig {
    /// Path to the database file.
    /// Set to ":memory:" or leave empty for an in-memory db,
    /// or use "md:<database>" for a MotherDuck database.
    #[serde(default)]
    pub path: String,
    /// Database string, used when no path is set
    #[serde(default)]
    pub database_name: Option<String>,
    /// Statements executed once on every new connection
    #[serde(default)]
    pub init_sql: Option<String>,
    /// The MotherDuck token, only read from the secure settings
    #[serde(skip)]
    pub motherduck_token: Option<String>,
}

impl DuckDbConnectionConfig {
    pub fn parse(settings: &DataSourceConfig) -> Result<Self> {
        let mut conf = config::from_value::<Self>(settings.json_data.clone())
            .context("Failed to parse connection configuration options")?;

        conf.motherduck_token = settings.secret(MOTHERDUCK_TOKEN_KEY).map(String::from);

        Ok(conf)
    }

    pub fn in_memory() -> Self {
        Self {
            path: ":memory:".into(),
            ..Default::default()
        }
    }

    /// The database string which is opened
    pub fn database(&self) -> &str {
        if !self.path.is_empty() {
            return &self.path;
        }

        self.database_name.as_deref().unwrap_or("")
    }

    /// The database string handed to duckdb, carrying the configured
    /// MotherDuck token as a connection parameter
    pub fn connection_string(&self) -> String {
        let database = self.database();

        match self.motherduck_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) if self.is_motherduck() => {
                let sep = if database.contains('?') { '&' } else { '?' };
                format!("{database}{sep}{MOTHERDUCK_TOKEN_ENV}={token}")
            }
            _ => database.to_string(),
        }
    }

    pub fn is_motherduck(&self) -> bool {
        self.database().starts_with(MOTHERDUCK_PREFIX)
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self.database(), "" | ":memory:")
    }

    /// Whether the database is a file on the local filesystem
    pub fn is_local_file(&self) -> bool {
        !self.is_motherduck() && !self.is_in_memory()
    }

    pub fn init_sql(&self) -> Option<&str> {
        self.init_sql.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The MotherDuck token from the settings, falling back to the environment
    pub fn resolve_motherduck_token(&self) -> Option<String> {
        self.motherduck_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| env::var(MOTHERDUCK_TOKEN_ENV).ok().filter(|t| !t.is_empty()))
    }

    /// Whether the token was configured in the secure settings
    pub fn is_token_configured(&self) -> bool {
        self.motherduck_token.as_deref().map_or(false, |t| !t.is_empty())
    }

    /// Checks the options are sufficient to open a connection
    pub fn validate(&self) -> Result<()> {
        if self.is_motherduck() && self.resolve_motherduck_token().is_none() {
            bail!("MotherDuck Token is missing for motherduck connection");
        }

        Ok(())
    }
}
