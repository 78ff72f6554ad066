use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use dca_core::{CalculatorPresentation, CalculatorPresenter, DcaResult, InvestmentParameters};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateRequest {
    symbol: String,
    initial_amount: f64,
    monthly_contribution: f64,
    start_index: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    result: DcaResult,
    lump_sum: DcaResult,
    presentation: CalculatorPresentation,
}

async fn calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<CalculateResponse>> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let asset = state.dca_service.load_symbol(&payload.symbol).await?;
    let params = InvestmentParameters::new(
        payload.initial_amount,
        payload.monthly_contribution,
        payload.start_index,
    );
    let comparison = state.dca_service.compare(&asset, &params)?;
    let presentation = CalculatorPresenter::new().present(&comparison.dca);

    tracing::debug!(
        "Calculated {} from index {}: value {:.2}",
        asset.symbol(),
        params.start_index,
        comparison.dca.current_value
    );

    Ok(Json(CalculateResponse {
        result: comparison.dca,
        lump_sum: comparison.lump_sum,
        presentation,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/calculate", post(calculate))
}
