pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letter;
use crate::enhancement::handlers as enhancement;
use crate::state::AppState;
use crate::trades::handlers as trades;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Enhancement API
        .route("/api/v1/enhance", post(enhancement::handle_enhance))
        .route("/api/v1/enhance/full", post(enhancement::handle_enhance_full))
        .route("/api/v1/ai-enhance", post(enhancement::handle_ai_enhance))
        .route(
            "/api/v1/ai-enhance/batch",
            post(enhancement::handle_ai_enhance_batch),
        )
        .route("/api/v1/ai/skills", post(enhancement::handle_skill_suggestions))
        .route(
            "/api/v1/ai/career-summary",
            post(enhancement::handle_career_summary),
        )
        .route("/api/v1/ai/status", get(enhancement::handle_ai_status))
        // Trades API
        .route("/api/v1/trades-enhance", post(trades::handle_trades_enhance))
        // Cover Letter API
        .route(
            "/api/v1/cover-letters/generate",
            post(cover_letter::handle_generate_cover_letter),
        )
        .with_state(state)
}
