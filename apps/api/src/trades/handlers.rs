//! Axum route handler for the Trades API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::trades::enhancer::{Trade, TradesEnhancer};

#[derive(Debug, Deserialize)]
pub struct TradesEnhanceRequest {
    pub text: String,
    pub trade: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TradeSuggestions {
    pub improvements: Vec<String>,
    pub metrics: Vec<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TradesEnhanceResponse {
    pub success: bool,
    pub original: String,
    pub enhanced: String,
    pub suggestions: TradeSuggestions,
}

/// POST /api/v1/trades-enhance
///
/// Rewrites a trade work description and returns the trade's skill and
/// certification tables alongside. Unknown trades use construction.
pub async fn handle_trades_enhance(
    AppJson(request): AppJson<TradesEnhanceRequest>,
) -> Result<Json<TradesEnhanceResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let enhancer = TradesEnhancer;
    let trade_key = request.trade.as_deref().unwrap_or("construction");
    let trade = Trade::parse_or_default(Some(trade_key));
    let result = enhancer.enhance_trade_description(&request.text, trade_key);

    let to_owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    Ok(Json(TradesEnhanceResponse {
        success: true,
        original: result.original,
        enhanced: result.enhanced,
        suggestions: TradeSuggestions {
            improvements: result.improvements,
            metrics: result.metrics,
            skills: to_owned(enhancer.skills(trade)),
            certifications: to_owned(enhancer.certifications(trade)),
        },
    }))
}
