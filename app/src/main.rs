// In app/src/main.rs

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use app_config::Settings;
use backtester::{BacktestResult, BacktestSettings, Backtester};
use clap::{Parser, Subcommand};
use core_types::StrategyConfig;
use execution::ClockIdGenerator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strategies::types::BollingerSettings;
use tokio::task;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Replays tick trade data through a trading strategy.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a backtest over the configured trade file and prints a summary.
    Backtest {
        /// Only replay trades from this UTC hour of day (e.g. "13").
        #[arg(long)]
        hour: Option<String>,

        /// Row cap for the load; defaults to the configured limit.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Strategy name ("bollinger"); omit for the buy-every-sample baseline.
        #[arg(short, long)]
        strategy: Option<String>,

        /// Bollinger window length.
        #[arg(long)]
        period: Option<usize>,

        /// Bollinger band width in standard deviations.
        #[arg(long)]
        std_dev: Option<f64>,

        /// Starting cash balance.
        #[arg(long)]
        initial_cash: Option<Decimal>,

        /// Quote currency committed to every entry.
        #[arg(long)]
        position_size: Option<Decimal>,

        /// Commission in percent of notional (0.05 = 5 bps).
        #[arg(long)]
        commission: Option<Decimal>,

        /// Trade file to read instead of the configured one.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Writes the full result (trades, equity curve, prices) as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lists how many trades the data file holds for each UTC hour.
    Hours {
        /// Trade file to read instead of the configured one.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Serves the HTTP API.
    Serve,
}

struct BacktestArgs {
    hour: Option<String>,
    limit: Option<usize>,
    strategy: Option<String>,
    period: Option<usize>,
    std_dev: Option<f64>,
    initial_cash: Option<Decimal>,
    position_size: Option<Decimal>,
    commission: Option<Decimal>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings();
    init_tracing(settings.as_ref().map(|s| s.app.log_level.as_str()).unwrap_or("info"));
    let settings = settings.context("Failed to load application settings")?;

    tracing::info!(environment = %settings.app.environment, "Starting tick backtester");

    match cli.command {
        Commands::Backtest {
            hour,
            limit,
            strategy,
            period,
            std_dev,
            initial_cash,
            position_size,
            commission,
            file,
            output,
        } => {
            let args = BacktestArgs {
                hour,
                limit,
                strategy,
                period,
                std_dev,
                initial_cash,
                position_size,
                commission,
                file,
                output,
            };
            handle_backtest(settings, args).await?;
        }
        Commands::Hours { file } => {
            handle_hours(settings, file).await?;
        }
        Commands::Serve => {
            web_server::run(settings).await?;
        }
    }

    Ok(())
}

/// Installs the fmt subscriber, filtered at `level` (INFO when it does not parse).
fn init_tracing(level: &str) {
    let level = tracing::Level::from_str(level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn trades_file(settings: &Settings, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(&settings.data.trades_file))
}

/// Picks the strategy from the CLI, layering `--period`/`--std-dev` over configured defaults.
fn strategy_config(settings: &Settings, args: &BacktestArgs) -> Result<StrategyConfig> {
    let name = args.strategy.clone().unwrap_or_default();
    let params = if name == "bollinger" {
        let mut bollinger: BollingerSettings = settings.strategies.bollinger.clone().unwrap_or_default();
        if let Some(period) = args.period {
            bollinger.period = period;
        }
        if let Some(std_dev) = args.std_dev {
            bollinger.std_dev = std_dev;
        }
        serde_json::to_value(bollinger)?
    } else {
        serde_json::Value::Null
    };
    Ok(StrategyConfig::new(name, params))
}

// --- "Backtest" Subcommand Logic ---

async fn handle_backtest(settings: Settings, args: BacktestArgs) -> Result<()> {
    // --- 1. Configuration ---
    let defaults = &settings.backtest;
    let run_settings = BacktestSettings {
        initial_cash: args.initial_cash.unwrap_or(defaults.initial_cash),
        position_size: args.position_size.unwrap_or(defaults.position_size),
        commission_rate: args
            .commission
            .map(|percent| percent / dec!(100))
            .unwrap_or(defaults.commission_rate),
        symbol: defaults.symbol.clone(),
    };
    let config = strategy_config(&settings, &args)?;
    let path = trades_file(&settings, args.file.clone());

    // --- 2. Load and replay off the async runtime ---
    let hour = args.hour.clone();
    let limit = args.limit;
    let data = settings.data.clone();
    let result = task::spawn_blocking(move || -> Result<BacktestResult> {
        let strategy = strategies::create_strategy(&config)?;
        let mut backtester =
            Backtester::from_settings(&run_settings, strategy, Arc::new(ClockIdGenerator::new()))?;

        let prices = match hour.as_deref() {
            Some(hour) => {
                market_data::load_prices_by_hour(&path, hour, limit.unwrap_or(data.hour_limit))?
            }
            None => market_data::load_prices(&path, limit.unwrap_or(data.default_limit))?,
        };
        tracing::info!(path = %path.display(), samples = prices.len(), "Loaded price series.");

        Ok(backtester.run(&prices).with_price_data(prices))
    })
    .await??;

    // --- 3. Report ---
    let initial_cash = args.initial_cash.unwrap_or(settings.backtest.initial_cash);
    print_report(&result, initial_cash);

    if let Some(output) = args.output {
        let writer = BufWriter::new(
            File::create(&output).with_context(|| format!("Failed to create {}", output.display()))?,
        );
        serde_json::to_writer_pretty(writer, &result)?;
        tracing::info!(path = %output.display(), "Backtest result written.");
    }

    Ok(())
}

/// Helper function to print the run summary in a readable format.
fn print_report(result: &BacktestResult, initial_cash: Decimal) {
    let net_pnl = result.final_equity - initial_cash;
    let net_pnl_pct = if initial_cash.is_zero() {
        Decimal::ZERO
    } else {
        net_pnl / initial_cash * dec!(100)
    };
    let buys = result.trades.iter().filter(|t| t.is_buy()).count();
    let commission: Decimal = result.trades.iter().map(|t| t.commission).sum();
    let samples = result.equity_curve.len();

    println!("\n--- Backtest Report ---");
    println!("-----------------------------------");
    println!("Samples:               {samples}");
    println!("Final Equity:          ${:.4}", result.final_equity);
    println!("Net P&L:               ${net_pnl:.4} ({net_pnl_pct:.2}%)");
    println!("Total Trades:          {} ({buys} buys, {} sells)", result.trades.len(), result.trades.len() - buys);
    println!("Commission Paid:       ${commission:.4}");
    println!("Duration:              {} ms", (result.end_time - result.start_time).num_milliseconds());
    println!("-----------------------------------");
}

// --- "Hours" Subcommand Logic ---

async fn handle_hours(settings: Settings, file: Option<PathBuf>) -> Result<()> {
    let path = trades_file(&settings, file);
    let hours = task::spawn_blocking(move || market_data::available_hours(&path)).await??;

    println!("\nHour (UTC)  Trades");
    println!("------------------");
    for info in &hours {
        println!("{:>10}  {:>6}", info.hour, info.count);
    }
    if hours.is_empty() {
        println!("No trades found.");
    }
    Ok(())
}
