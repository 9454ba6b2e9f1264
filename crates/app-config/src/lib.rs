// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::Settings;

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from built-in defaults.
/// 2. Merges an optional `config/base.toml` file.
/// 3. Merges an optional environment-specific file (e.g., `config/development.toml`).
/// 4. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment, true)
}

/// Loads settings from the TOML files in `config_dir` for the given environment.
///
/// With `with_env` set, `APP_`-prefixed environment variables are layered on top,
/// using `__` as the section separator (e.g., `APP_LEADERBOARD__LIMIT=10`).
pub fn load_settings_from(config_dir: &Path, environment: &str, with_env: bool) -> Result<Settings> {
    let mut builder = Config::builder()
        .set_default("app.environment", environment)?
        .add_source(File::from(config_dir.join("base")).required(false))
        .add_source(File::from(config_dir.join(environment)).required(false));

    if with_env {
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    }

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = builder.build()?.try_deserialize()?;

    Ok(settings)
}
