// In crates/web-server/src/lib.rs

use std::sync::Arc;

use app_config::Settings;
use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection},
    response::Json,
    routing::{get, post},
};
use backtester::{BacktestResult, BacktestSettings, Backtester};
use core_types::PricePoint;
use execution::{ClockIdGenerator, TradeIdGenerator};
use market_data::HourInfo;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use types::{BacktestRequest, TradesQuery, non_empty, positive_or};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// One id source for every run served by this process.
    pub ids: Arc<dyn TradeIdGenerator>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            ids: Arc::new(ClockIdGenerator::new()),
        }
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/trades", get(get_trades_handler))
        .route("/hours", get(get_hours_handler))
        .route("/backtest", post(run_backtest_handler));

    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "tick-backtester" }))
}

/// Reads the price series a request asks for: one hour of the day, or the head of the file.
fn load_series(settings: &Settings, hour: Option<&str>) -> Result<Vec<PricePoint>> {
    let data = &settings.data;
    let points = match hour {
        Some(hour) => market_data::load_prices_by_hour(&data.trades_file, hour, data.hour_limit)?,
        None => market_data::load_prices(&data.trades_file, data.default_limit)?,
    };
    Ok(points)
}

/// The handler for `GET /api/trades`.
async fn get_trades_handler(
    State(state): State<AppState>,
    Query(query): Query<TradesQuery>,
) -> Result<Json<Vec<PricePoint>>> {
    let hour = non_empty(&query.hour).map(str::to_string);
    let settings = Arc::clone(&state.settings);
    let points = tokio::task::spawn_blocking(move || load_series(&settings, hour.as_deref())).await??;
    Ok(Json(points))
}

/// The handler for `GET /api/hours`.
async fn get_hours_handler(State(state): State<AppState>) -> Result<Json<Vec<HourInfo>>> {
    let settings = Arc::clone(&state.settings);
    let hours =
        tokio::task::spawn_blocking(move || market_data::available_hours(&settings.data.trades_file))
            .await??;
    Ok(Json(hours))
}

/// Loads the requested series and replays it through a freshly built backtester.
pub fn execute_backtest(
    settings: &Settings,
    ids: Arc<dyn TradeIdGenerator>,
    request: &BacktestRequest,
) -> Result<BacktestResult> {
    let defaults = &settings.backtest;
    let commission_rate = match request.commission {
        Some(percent) if percent > Decimal::ZERO => percent / dec!(100),
        _ => defaults.commission_rate,
    };
    let run_settings = BacktestSettings {
        initial_cash: positive_or(request.initial_cash, defaults.initial_cash),
        position_size: positive_or(request.position_size, defaults.position_size),
        commission_rate,
        symbol: defaults.symbol.clone(),
    };

    let strategy_config = request.strategy_config(&settings.strategies)?;
    let strategy = strategies::create_strategy(&strategy_config)?;
    let mut backtester = Backtester::from_settings(&run_settings, strategy, ids)?;

    let prices = load_series(settings, non_empty(&request.hour))?;
    tracing::info!(
        strategy = %strategy_config.name,
        hour = non_empty(&request.hour).unwrap_or("-"),
        samples = prices.len(),
        "Running backtest request."
    );
    let result = backtester.run(&prices);
    Ok(result.with_price_data(prices))
}

/// The handler for `POST /api/backtest`.
async fn run_backtest_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BacktestRequest>, JsonRejection>,
) -> Result<Json<BacktestResult>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable backtest request.");
        Error::BadRequest("Invalid request format".to_string())
    })?;

    let result = tokio::task::spawn_blocking(move || {
        execute_backtest(&state.settings, Arc::clone(&state.ids), &request)
    })
    .await??;
    Ok(Json(result))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: Settings) -> Result<()> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let app = create_router(AppState::new(settings));

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!(%address, "Web server listening.");

    axum::serve(listener, app).await.map_err(Error::Serve)?;
    Ok(())
}
