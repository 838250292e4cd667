// In crates/web-server/src/error.rs

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Data(#[from] market_data::Error),

    #[error(transparent)]
    Strategy(#[from] strategies::Error),

    #[error(transparent)]
    Backtest(#[from] backtester::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server stopped unexpectedly: {0}")]
    Serve(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Strategy(_) | Error::Backtest(_) => StatusCode::BAD_REQUEST,
            Error::Data(_) | Error::Join(_) | Error::ServerBindError(_) | Error::Serve(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed.");
        } else {
            tracing::debug!(error = %self, "Request rejected.");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
