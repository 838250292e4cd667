// In crates/market-data/src/loader.rs

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use core_types::{PricePoint, timestamp_from_millis};
use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::Result;
use crate::types::HourInfo;

const PRICE_FIELD: usize = 1;
const TIME_FIELD: usize = 4;
const MIN_FIELDS: usize = 5;

fn open(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path)?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

fn parse_time(record: &StringRecord) -> Option<i64> {
    record.get(TIME_FIELD)?.trim().parse().ok()
}

fn parse_price(record: &StringRecord) -> Option<Decimal> {
    let raw = record.get(PRICE_FIELD)?.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Two-digit UTC hour of day for an epoch-millisecond timestamp.
fn hour_of(millis: i64) -> String {
    timestamp_from_millis(millis).format("%H").to_string()
}

/// Accepts `"7"` as well as `"07"`.
fn normalize_hour(hour: &str) -> String {
    match hour.trim().parse::<u32>() {
        Ok(h) if h < 24 => format!("{h:02}"),
        _ => hour.to_string(),
    }
}

fn report_skipped(path: &Path, skipped: usize) {
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "Skipped rows with unparsable price or time.");
    }
}

/// Loads the first `limit` trades of the file as a price series (`limit == 0` loads all).
pub fn load_prices(path: impl AsRef<Path>, limit: usize) -> Result<Vec<PricePoint>> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let mut points = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        if limit > 0 && points.len() >= limit {
            break;
        }
        let record = record?;
        if record.len() < MIN_FIELDS {
            continue;
        }
        match (parse_time(&record), parse_price(&record)) {
            (Some(time), Some(price)) => points.push(PricePoint { time, price }),
            _ => skipped += 1,
        }
    }

    report_skipped(path, skipped);
    debug!(path = %path.display(), points = points.len(), limit, "Loaded price series.");
    Ok(points)
}

/// Loads the trades whose UTC hour of day is `hour`.
///
/// The first `limit` matching trades are all kept. Past that, a sampling rate of
/// `max(count / limit, 2)` is fixed once and only every `rate`-th matching trade is kept,
/// so the series stays bounded without losing the tail of the hour.
pub fn load_prices_by_hour(path: impl AsRef<Path>, hour: &str, limit: usize) -> Result<Vec<PricePoint>> {
    let path = path.as_ref();
    let hour = normalize_hour(hour);
    let mut reader = open(path)?;
    let mut points = Vec::new();
    let mut skipped = 0usize;
    let mut count = 0usize;
    let mut rate = 1usize;

    for record in reader.records() {
        let record = record?;
        if record.len() < MIN_FIELDS {
            continue;
        }
        let Some(time) = parse_time(&record) else {
            skipped += 1;
            continue;
        };
        if hour_of(time) != hour {
            continue;
        }
        let Some(price) = parse_price(&record) else {
            skipped += 1;
            continue;
        };

        count += 1;
        if limit > 0 && count > limit {
            if rate == 1 {
                rate = (count / limit).max(2);
            }
            if count % rate != 0 {
                continue;
            }
        }
        points.push(PricePoint { time, price });
    }

    report_skipped(path, skipped);
    debug!(
        path = %path.display(),
        %hour,
        matched = count,
        points = points.len(),
        sample_rate = rate,
        "Loaded hourly price series."
    );
    Ok(points)
}

/// Counts trades per UTC hour of day, sorted by hour.
pub fn available_hours(path: impl AsRef<Path>) -> Result<Vec<HourInfo>> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        if record.len() < MIN_FIELDS {
            continue;
        }
        match parse_time(&record) {
            Some(time) => *counts.entry(hour_of(time)).or_default() += 1,
            None => skipped += 1,
        }
    }

    report_skipped(path, skipped);
    Ok(counts
        .into_iter()
        .map(|(hour, count)| HourInfo { hour, count })
        .collect())
}
