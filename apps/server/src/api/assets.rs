use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use dca_core::MonthOption;
use dca_market_data::SearchResult;

#[derive(serde::Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_symbols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let results = state.dca_service.search(&query.q).await?;
    Ok(Json(results))
}

async fn get_month_options(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MonthOption>>> {
    let asset = state.dca_service.load_symbol(&symbol).await?;
    Ok(Json(state.dca_service.month_options(&asset)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search_symbols))
        .route("/assets/{symbol}/months", get(get_month_options))
}
