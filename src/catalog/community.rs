//! Shared games the community feed starts with on a fresh install.

use crate::models::{CommunityGame, RatingTotals, SavedGame};

use super::top_rated_games;

/// (curated id, community id, author, rating total, rating count)
const SEEDS: &[(&str, &str, &str, u32, u32)] = &[
    ("top-monsters-bounty", "community-monsters-bounty", "StatsWizard", 142, 31),
    ("top-gravity-sling", "community-gravity-sling", "OrbitalOlga", 96, 22),
    ("top-cell-siege", "community-cell-siege", "BioBuff", 57, 14),
];

/// Community copies of the curated games with preset ratings.
pub fn initial_community_games() -> Vec<CommunityGame> {
    let curated = top_rated_games();
    SEEDS
        .iter()
        .filter_map(|&(curated_id, id, author, total, count)| {
            let game = curated.iter().find(|game| game.id == curated_id)?;
            let mut shared = CommunityGame {
                game: SavedGame {
                    id: id.to_string(),
                    name: game.name.clone(),
                    subject: game.subject.clone(),
                    payload: game.payload.clone(),
                    is_public: true,
                },
                author_name: author.to_string(),
                ratings: RatingTotals { total, count },
                average_rating: 0.0,
                image_url: Some(game.image_url.clone()),
            };
            shared.refresh_average();
            Some(shared)
        })
        .collect()
}
