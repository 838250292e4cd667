// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DataSettings, ServerSettings, Settings, StrategySettings};

/// Loads the application settings from the `config/` directory and the environment.
///
/// Layers, later ones overriding earlier ones:
/// 1. `config/base.toml` (optional).
/// 2. `config/{APP_ENVIRONMENT}.toml` (optional, `development` by default).
/// 3. Environment variables, e.g. `APP__SERVER__PORT=9000`.
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from("config", &environment)
}

/// Same layering as [`load_settings`], rooted at `dir` for a given environment name.
pub fn load_settings_from(dir: &str, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name(&format!("{dir}/base")).required(false))
        .add_source(File::with_name(&format!("{dir}/{environment}")).required(false))
        .add_source(Environment::with_prefix("APP").prefix_separator("__").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    Ok(settings)
}
