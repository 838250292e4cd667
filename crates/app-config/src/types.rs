// In crates/app-config/src/types.rs

use backtester::BacktestSettings;
use serde::Deserialize;
use strategies::types::BollingerSettings;

/// Default parameters for each strategy, used when a request does not supply its own.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct StrategySettings {
    pub bollinger: Option<BollingerSettings>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Where tick data lives and how much of it a request may load.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DataSettings {
    /// CSV trade dump served by the API and used by the CLI by default.
    #[serde(default = "default_trades_file")]
    pub trades_file: String,
    /// Row cap for unfiltered loads.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Row cap (before sampling) for per-hour loads.
    #[serde(default = "default_hour_limit")]
    pub hour_limit: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            trades_file: default_trades_file(),
            default_limit: default_limit(),
            hour_limit: default_hour_limit(),
        }
    }
}

fn default_trades_file() -> String {
    "upload/trades/STBLUSDT-trades-2025-09-20.csv".to_string()
}

fn default_limit() -> usize {
    market_data::DEFAULT_LIMIT
}

fn default_hour_limit() -> usize {
    market_data::DEFAULT_HOUR_LIMIT
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    /// Defaults for every backtest run.
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub strategies: StrategySettings,
}
