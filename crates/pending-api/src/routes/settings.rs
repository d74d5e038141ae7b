//! Settings API endpoint - JSON API

use crate::AppState;

pub async fn api_settings(state: axum::extract::State<AppState>) -> axum::Json<pending_config::Config> {
    axum::Json(state.config.as_ref().clone())
}
