//! The user's persisted collections and the rules that keep them consistent.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{image_for_subject, DEFAULT_COMMUNITY_IMAGE};
use crate::errors::AppError;
use crate::models::{CommunityGame, GamePayload, RatingTotals, SavedGame, UserSettings};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
    pub favorites: Vec<String>,
    pub saved_games: Vec<SavedGame>,
    pub community_games: Vec<CommunityGame>,
    pub user_ratings: BTreeMap<String, u8>,
    pub settings: UserSettings,
}

/// A community game annotated with the current user's rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityListing {
    #[serde(flatten)]
    pub game: CommunityGame,
    pub user_rating: u8,
}

impl UserData {
    /// Add or remove a subject from the favourites. Returns whether it is now a favourite.
    pub fn toggle_favorite(&mut self, title: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|fav| fav == title) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(title.to_string());
            true
        }
    }

    /// Time-derived id, bumped until unused.
    fn fresh_game_id(&self, now_millis: i64) -> String {
        let mut stamp = now_millis;
        loop {
            let id = format!("game-{}", stamp);
            if !self.saved_games.iter().any(|game| game.id == id) {
                return id;
            }
            stamp += 1;
        }
    }

    pub fn save_game(
        &mut self,
        name: &str,
        subject: Option<&str>,
        payload: GamePayload,
        now_millis: i64,
    ) -> Result<SavedGame, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("A name is required to save".to_string()));
        }

        let game = SavedGame {
            id: self.fresh_game_id(now_millis),
            name: name.to_string(),
            subject: subject.unwrap_or("Custom").to_string(),
            payload,
            is_public: false,
        };
        self.saved_games.push(game.clone());
        Ok(game)
    }

    pub fn find_saved(&self, id: &str) -> Option<&SavedGame> {
        self.saved_games.iter().find(|game| game.id == id)
    }

    pub fn find_community(&self, id: &str) -> Option<&CommunityGame> {
        self.community_games.iter().find(|game| game.id() == id)
    }

    /// Flip a saved game between private and public, keeping the community copy in step.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<SavedGame, AppError> {
        let game = self
            .saved_games
            .iter_mut()
            .find(|game| game.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Saved game {} not found", id)))?;
        game.is_public = !game.is_public;
        let game = game.clone();

        if game.is_public {
            if self.find_community(id).is_none() {
                let image_url = image_for_subject(&game.subject)
                    .unwrap_or(DEFAULT_COMMUNITY_IMAGE)
                    .to_string();
                self.community_games.push(CommunityGame {
                    game: game.clone(),
                    author_name: self.settings.author_name(),
                    ratings: RatingTotals::default(),
                    average_rating: 0.0,
                    image_url: Some(image_url),
                });
                tracing::info!("Shared game {} with the community", id);
            }
        } else {
            self.unshare(id);
            tracing::info!("Game {} is private again", id);
        }

        Ok(game)
    }

    /// Remove a saved game and any community copy of it.
    pub fn delete_game(&mut self, id: &str) -> Result<(), AppError> {
        let before = self.saved_games.len();
        self.saved_games.retain(|game| game.id != id);
        if self.saved_games.len() == before {
            return Err(AppError::NotFound(format!("Saved game {} not found", id)));
        }
        self.unshare(id);
        Ok(())
    }

    /// Drop the community copy together with the user's rating of it.
    fn unshare(&mut self, id: &str) {
        self.community_games.retain(|shared| shared.id() != id);
        self.user_ratings.remove(id);
    }

    /// Rate a community game. A repeat rating replaces the user's previous contribution.
    pub fn rate_game(&mut self, id: &str, rating: u8) -> Result<CommunityGame, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let previous = self.user_ratings.get(id).copied().unwrap_or(0);
        let game = self
            .community_games
            .iter_mut()
            .find(|game| game.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("Community game {} not found", id)))?;

        if previous > 0 {
            game.ratings.total = game.ratings.total.saturating_sub(u32::from(previous))
                + u32::from(rating);
        } else {
            game.ratings.total += u32::from(rating);
            game.ratings.count += 1;
        }
        game.refresh_average();
        let game = game.clone();

        self.user_ratings.insert(id.to_string(), rating);
        Ok(game)
    }

    /// Case-insensitive match on name, subject or author.
    pub fn search_community(&self, term: &str) -> Vec<CommunityListing> {
        let needle = term.trim().to_lowercase();
        self.community_games
            .iter()
            .filter(|game| {
                needle.is_empty()
                    || game.game.name.to_lowercase().contains(&needle)
                    || game.game.subject.to_lowercase().contains(&needle)
                    || game.author_name.to_lowercase().contains(&needle)
            })
            .map(|game| CommunityListing {
                game: game.clone(),
                user_rating: self.user_ratings.get(game.id()).copied().unwrap_or(0),
            })
            .collect()
    }
}
