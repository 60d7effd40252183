//! User settings endpoints.

use axum::extract::State;

use super::{success, ApiJson, ApiResult};
use crate::models::UserSettings;
use crate::AppState;

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<UserSettings> {
    success(state.session.lock().await.data().settings.clone())
}

/// PUT /api/settings - Replace the settings. A blank prompt restores the built-in one.
pub async fn update_settings(
    State(state): State<AppState>,
    ApiJson(settings): ApiJson<UserSettings>,
) -> ApiResult<UserSettings> {
    let saved = state.session.lock().await.update_settings(settings).await;
    tracing::info!("Settings updated");
    success(saved)
}
