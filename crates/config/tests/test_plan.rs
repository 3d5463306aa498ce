//! Settings resolution against a scratch working directory.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use fitness_config::{load, AppConfig, CONFIG_PATH_VAR};

const OVERRIDES: &[&str] = &[
    CONFIG_PATH_VAR,
    "FITNESS__HTTP__ADDRESS",
    "FITNESS__HTTP__PORT",
    "FITNESS__DATABASE__URL",
    "FITNESS__DATABASE__MAX_CONNECTIONS",
];

/// Runs a test inside an empty directory with every `FITNESS` variable unset,
/// and puts the process back the way it was on drop.
struct Sandbox {
    dir: TempDir,
    previous_cwd: PathBuf,
    previous_env: Vec<(&'static str, Option<OsString>)>,
}

impl Sandbox {
    fn enter() -> Self {
        let dir = TempDir::new().unwrap();
        let previous_cwd = std::env::current_dir().unwrap();
        let previous_env = OVERRIDES
            .iter()
            .map(|key| (*key, std::env::var_os(key)))
            .collect();

        for key in OVERRIDES {
            std::env::remove_var(key);
        }
        std::env::set_current_dir(dir.path()).unwrap();

        Self {
            dir,
            previous_cwd,
            previous_env,
        }
    }

    fn file(&self, relative: &str, toml: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap_or(Path::new("."))).unwrap();
        fs::write(&path, toml).unwrap();
        path
    }

    fn env(&self, key: &str, value: impl AsRef<std::ffi::OsStr>) {
        std::env::set_var(key, value);
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous_cwd);
        for (key, value) in self.previous_env.drain(..) {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn nothing_configured_yields_local_defaults() {
    let _sandbox = Sandbox::enter();

    let config = load().unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 7070);
    assert_eq!(config.database.url, "sqlite://fitness.db");
    assert_eq!(config.database.max_connections, 5);
}

#[test]
#[serial]
fn discovered_file_fills_in_only_what_it_names() {
    let sandbox = Sandbox::enter();
    sandbox.file("config/fitness.toml", "[database]\nmax_connections = 12\n");

    let config = load().unwrap();

    assert_eq!(config.database.max_connections, 12);
    assert_eq!(config.database.url, "sqlite://fitness.db");
    assert_eq!(config.http, AppConfig::default().http);
}

#[test]
#[serial]
fn explicit_path_wins_over_discovered_file() {
    let sandbox = Sandbox::enter();
    sandbox.file("fitness.toml", "[http]\nport = 1111\n");
    let explicit = sandbox.file(
        "deploy/fitness.toml",
        r#"
        [http]
        address = "0.0.0.0"
        port = 2222

        [database]
        url = "sqlite:///srv/fitness/records.db"
        "#,
    );
    sandbox.env(CONFIG_PATH_VAR, &explicit);

    let config = load().unwrap();

    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 2222);
    assert_eq!(config.database.url, "sqlite:///srv/fitness/records.db");
}

#[test]
#[serial]
fn explicit_path_that_does_not_exist_is_an_error() {
    let sandbox = Sandbox::enter();
    sandbox.env(CONFIG_PATH_VAR, sandbox.dir.path().join("missing.toml"));

    assert!(load().is_err());
}

#[test]
#[serial]
fn environment_overrides_beat_the_file() {
    let sandbox = Sandbox::enter();
    sandbox.file("fitness.toml", "[http]\nport = 3030\n\n[database]\nmax_connections = 2\n");
    sandbox.env("FITNESS__HTTP__PORT", "8080");
    sandbox.env("FITNESS__DATABASE__URL", "sqlite://override.db");

    let config = load().unwrap();

    assert_eq!(config.http.port, 8080);
    assert_eq!(config.database.url, "sqlite://override.db");
    assert_eq!(config.database.max_connections, 2);
}

#[test]
#[serial]
fn port_that_is_not_a_number_is_rejected() {
    let sandbox = Sandbox::enter();
    sandbox.env("FITNESS__HTTP__PORT", "seventy");

    let error = load().unwrap_err();
    assert!(
        format!("{error:#}").contains("invalid value"),
        "unexpected error: {error:#}"
    );

    std::env::remove_var("FITNESS__HTTP__PORT");
    sandbox.file("fitness.toml", "[http]\nport = \"not-a-port\"\n");
    assert!(load().is_err());
}

#[test]
#[serial]
fn malformed_toml_is_rejected() {
    let sandbox = Sandbox::enter();
    sandbox.file("fitness.toml", "[http\nport = 1\n");

    let error = load().unwrap_err();
    assert!(
        format!("{error:#}").contains("failed to read settings"),
        "unexpected error: {error:#}"
    );
}
