// In crates/web-server/src/types.rs

use app_config::StrategySettings;
use core_types::StrategyConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Query parameters of `GET /api/trades` (e.g. `?hour=13`).
#[derive(Debug, Default, Deserialize)]
pub struct TradesQuery {
    #[serde(default)]
    pub hour: Option<String>,
}

/// The body of `POST /api/backtest`.
///
/// Missing or non-positive numbers fall back to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct BacktestRequest {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub initial_cash: Option<Decimal>,
    #[serde(default)]
    pub position_size: Option<Decimal>,
    /// Commission in percent: `0.05` means 0.05% of notional.
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub strategy_params: Value,
}

/// `value` when it is present and positive, `default` otherwise.
pub fn positive_or(value: Option<Decimal>, default: Decimal) -> Decimal {
    value.filter(|v| *v > Decimal::ZERO).unwrap_or(default)
}

/// Treats an empty hour the same as no hour.
pub fn non_empty(hour: &Option<String>) -> Option<&str> {
    hour.as_deref().map(str::trim).filter(|h| !h.is_empty())
}

impl BacktestRequest {
    /// Resolves the strategy name and parameters, filling in configured defaults
    /// when the request carries no parameters.
    pub fn strategy_config(&self, defaults: &StrategySettings) -> strategies::Result<StrategyConfig> {
        let name = self.strategy.as_deref().unwrap_or_default().trim().to_string();
        let has_params = match &self.strategy_params {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        };

        let params = match (name.as_str(), &defaults.bollinger) {
            ("bollinger", Some(bollinger)) if !has_params => serde_json::to_value(bollinger)?,
            _ => self.strategy_params.clone(),
        };
        Ok(StrategyConfig::new(name, params))
    }
}
