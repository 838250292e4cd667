use crate::bollinger::BollingerBands;
use crate::types::BollingerSettings;
use crate::{Error, Result, Strategy};
use core_types::StrategyConfig;

/// Builds the strategy named in `config`.
///
/// An empty name (or `none`) selects no strategy, which makes the backtester fall back to
/// its buy-every-sample baseline. Missing parameters take the strategy's defaults.
pub fn create_strategy(config: &StrategyConfig) -> Result<Option<Box<dyn Strategy + Send>>> {
    let strategy: Box<dyn Strategy + Send> = match config.name.trim() {
        "" | "none" => return Ok(None),
        "bollinger" => {
            let settings: BollingerSettings = if config.params.is_null() {
                BollingerSettings::default()
            } else {
                serde_json::from_value(config.params.clone())?
            };
            Box::new(BollingerBands::new(settings)?)
        }
        unknown => return Err(Error::UnknownStrategy(unknown.to_string())),
    };

    tracing::debug!(strategy = strategy.name(), "Strategy created.");
    Ok(Some(strategy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_name_means_no_strategy() {
        let created = create_strategy(&StrategyConfig::new("", json!(null))).unwrap();
        assert!(created.is_none());
    }

    #[test]
    fn bollinger_accepts_camel_case_std_dev() {
        let config = StrategyConfig::new("bollinger", json!({ "period": 20, "stdDev": 2.0 }));
        let created = create_strategy(&config).unwrap().unwrap();
        assert_eq!(created.name(), "BollingerBands");
    }

    #[test]
    fn bollinger_defaults_missing_params() {
        let settings: BollingerSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings, BollingerSettings { period: 100, std_dev: 1.0 });
        assert!(create_strategy(&StrategyConfig::new("bollinger", json!({}))).unwrap().is_some());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let result = create_strategy(&StrategyConfig::new("martingale", json!(null)));
        assert!(matches!(result, Err(Error::UnknownStrategy(name)) if name == "martingale"));
    }

    #[test]
    fn malformed_params_are_an_error() {
        let config = StrategyConfig::new("bollinger", json!({ "period": "twenty" }));
        assert!(matches!(create_strategy(&config), Err(Error::Params(_))));
    }
}
