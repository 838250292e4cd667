// In crates/market-data/src/types.rs

use serde::Serialize;

/// Number of trades recorded during one UTC hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourInfo {
    /// Two-digit hour, `"00"` to `"23"`.
    pub hour: String,
    pub count: usize,
}

/// Default number of rows returned by an unfiltered load.
pub const DEFAULT_LIMIT: usize = 1_000;

/// Default number of rows returned by a per-hour load.
pub const DEFAULT_HOUR_LIMIT: usize = 10_000;
