// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BollingerSettings {
    /// Number of prices in the rolling window.
    #[serde(default = "default_period")]
    pub period: usize,
    /// Band width in standard deviations. API clients send this as `stdDev`.
    #[serde(default = "default_std_dev", alias = "stdDev")]
    pub std_dev: f64,
}

impl Default for BollingerSettings {
    fn default() -> Self {
        Self {
            period: default_period(),
            std_dev: default_std_dev(),
        }
    }
}

fn default_period() -> usize { 100 }
fn default_std_dev() -> f64 { 1.0 }
