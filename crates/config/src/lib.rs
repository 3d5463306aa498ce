//! Settings for the fitness records service.
//!
//! Later layers win: compiled defaults, then at most one TOML file, then
//! `FITNESS__SECTION__KEY` environment variables.

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Names an explicit settings file, skipping the search below.
pub const CONFIG_PATH_VAR: &str = "FITNESS_CONFIG";

const ENV_PREFIX: &str = "FITNESS";
const ENV_SEPARATOR: &str = "__";

/// Relative to the working directory, first match wins.
const SEARCH_PATHS: &[&str] = &["fitness.toml", "config/fitness.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

/// Where the relational store lives and how many connections may be open at once.
///
/// ```
/// use fitness_config::DatabaseConfig;
///
/// let database = DatabaseConfig::default();
/// assert_eq!(database.url, "sqlite://fitness.db");
/// assert_eq!(database.max_connections, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://fitness.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Resolve the settings the service runs with.
///
/// ```
/// std::env::remove_var(fitness_config::CONFIG_PATH_VAR);
///
/// let config = fitness_config::load().expect("defaults always load");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults =
        Config::try_from(&AppConfig::default()).context("failed to encode default settings")?;
    let mut builder = Config::builder().add_source(defaults);

    match settings_file() {
        Some(path) => {
            debug!(path = %path.display(), "reading settings file");
            builder = builder.add_source(File::from(path));
        }
        None => debug!("no settings file, using defaults and environment"),
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR),
        )
        .build()
        .context("failed to read settings")?
        .try_deserialize::<AppConfig>()
        .context("settings have an invalid value")?;

    debug!(?settings, "settings resolved");
    Ok(settings)
}

fn settings_file() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(explicit));
    }

    let cwd = std::env::current_dir().ok()?;
    SEARCH_PATHS
        .iter()
        .map(|relative| cwd.join(relative))
        .find(|path| path.is_file())
}
