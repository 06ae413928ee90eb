use serde::Deserialize;

use directory_core::config::Config;

/// Directory service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct DirectoryConfig {
    /// Datastore connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `DIRECTORY_PORT`.
    #[serde(default = "default_port")]
    pub directory_port: u16,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_port() -> u16 {
    3120
}

impl Config for DirectoryConfig {}
