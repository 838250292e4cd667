// In crates/risk/src/types.rs

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimpleRiskSettings {
    /// Fixed amount of quote currency committed to every entry (e.g. 50 USDT).
    #[serde(default = "default_position_size")]
    pub position_size: Decimal,
}

impl Default for SimpleRiskSettings {
    fn default() -> Self {
        Self {
            position_size: default_position_size(),
        }
    }
}

fn default_position_size() -> Decimal {
    dec!(50)
}
