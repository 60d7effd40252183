//! Library, favourites and community endpoints.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiJson, ApiResult};
use crate::models::{CommunityGame, SavedGame};
use crate::session::CommunityListing;
use crate::AppState;

/// Saved games together with the favourite subjects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryResponse {
    pub saved_games: Vec<SavedGame>,
    pub favorites: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub title: String,
    pub is_favorite: bool,
    pub favorites: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CommunityQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
}

/// GET /api/library - Saved games and favourites.
pub async fn get_library(State(state): State<AppState>) -> ApiResult<LibraryResponse> {
    let controller = state.session.lock().await;
    let data = controller.data();
    success(LibraryResponse {
        saved_games: data.saved_games.clone(),
        favorites: data.favorites.clone(),
    })
}

/// DELETE /api/library/:id - Delete a saved game and its community copy.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResponse> {
    state.session.lock().await.delete_game(&id).await?;
    success(DeleteResponse { deleted: true, id })
}

/// POST /api/library/:id/visibility - Share or unshare a saved game.
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SavedGame> {
    let game = state.session.lock().await.toggle_visibility(&id).await?;
    success(game)
}

/// POST /api/favorites/toggle - Add or remove a favourite subject.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FavoriteRequest>,
) -> ApiResult<FavoriteResponse> {
    let mut controller = state.session.lock().await;
    let is_favorite = controller.toggle_favorite(&request.title).await?;
    success(FavoriteResponse {
        title: request.title.trim().to_string(),
        is_favorite,
        favorites: controller.data().favorites.clone(),
    })
}

/// GET /api/community?q= - Shared games, optionally filtered.
pub async fn list_community(
    State(state): State<AppState>,
    Query(query): Query<CommunityQuery>,
) -> ApiResult<Vec<CommunityListing>> {
    let term = query.q.unwrap_or_default();
    success(state.session.lock().await.search_community(&term))
}

/// POST /api/community/:id/rating - Rate a shared game.
pub async fn rate_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<RatingRequest>,
) -> ApiResult<CommunityGame> {
    let game = state
        .session
        .lock()
        .await
        .rate_game(&id, request.rating)
        .await?;
    success(game)
}
