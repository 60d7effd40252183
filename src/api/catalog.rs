//! Static catalog endpoints.

use super::{success, ApiResult};
use crate::catalog::{top_rated_games, Category, CATEGORIES};
use crate::models::CuratedGame;

/// GET /api/catalog/subjects - Subject categories.
pub async fn list_subjects() -> ApiResult<&'static [Category]> {
    success(CATEGORIES)
}

/// GET /api/catalog/top-rated - Curated games.
pub async fn list_top_rated() -> ApiResult<Vec<CuratedGame>> {
    success(top_rated_games())
}
