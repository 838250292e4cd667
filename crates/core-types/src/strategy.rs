use serde::Deserialize;
use serde_json::Value;

/// A strategy selection as it arrives from a config file, the CLI or an API request.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub name: String,
    // Free-form parameter table, interpreted by the strategy factory.
    #[serde(default)]
    pub params: Value,
}

impl StrategyConfig {
    pub fn new(name: impl Into<String>, params: Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}
