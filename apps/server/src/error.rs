use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use dca_core::errors::Error as CoreError;
use dca_market_data::errors::MarketDataError;
use serde::Serialize;
use thiserror::Error;

/// Seconds a client should wait after a transient provider failure.
const RETRY_AFTER_SECS: &str = "60";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) | CoreError::Calculation(_) => StatusCode::BAD_REQUEST,
                CoreError::NoPriceData(_) => StatusCode::NOT_FOUND,
                CoreError::MarketData(e) => match e {
                    MarketDataError::SymbolNotFound(_) => StatusCode::NOT_FOUND,
                    MarketDataError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                    MarketDataError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                },
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn is_transient(&self) -> bool {
        match self {
            ApiError::Core(CoreError::MarketData(e)) => e.retry_class().is_transient(),
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed with {}: {}", status, self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        let mut response = (status, body).into_response();
        if self.is_transient() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
