//! Generated content and the saved/shared game records built from it.

use serde::{Deserialize, Serialize};

/// One answer the learner can pick in a scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RpgInteractionOption {
    pub text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub feedback: String,
}

/// A scene of a branching lesson.
///
/// `next_scene_id == None` marks the final scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RpgScene {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub challenge: String,
    pub options: Vec<RpgInteractionOption>,
    #[serde(default)]
    pub next_scene_id: Option<String>,
}

#[cfg(test)]
impl RpgScene {
    pub fn is_final(&self) -> bool {
        self.next_scene_id.is_none()
    }
}

/// Narrative content: an ordered branching scene graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RpgData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub scenes: Vec<RpgScene>,
}

impl RpgData {
    pub fn scene_index(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.id == id)
    }
}

/// Generated app content: the spec and the HTML derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebAppData {
    pub spec: String,
    pub code: String,
}

/// Playable content, tagged the way stored games carry it (`type` + `data`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum GamePayload {
    Rpg(RpgData),
    WebApp(WebAppData),
}

impl GamePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            GamePayload::Rpg(_) => "rpg",
            GamePayload::WebApp(_) => "webapp",
        }
    }
}

/// A game in the user's private library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub id: String,
    pub name: String,
    pub subject: String,
    #[serde(flatten)]
    pub payload: GamePayload,
    /// Absent in libraries written before sharing existed.
    #[serde(default)]
    pub is_public: bool,
}

/// Aggregate of every rating a community game has received.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RatingTotals {
    pub total: u32,
    pub count: u32,
}

impl RatingTotals {
    pub fn average(&self) -> f64 {
        if self.count > 0 {
            f64::from(self.total) / f64::from(self.count)
        } else {
            0.0
        }
    }
}

/// A publicly shared copy of a saved game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommunityGame {
    #[serde(flatten)]
    pub game: SavedGame,
    pub author_name: String,
    #[serde(default)]
    pub ratings: RatingTotals,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CommunityGame {
    pub fn id(&self) -> &str {
        &self.game.id
    }

    /// Recompute the derived average from the rating totals.
    pub fn refresh_average(&mut self) {
        self.average_rating = self.ratings.average();
    }
}

/// A hand-made game from the curated catalog.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CuratedGame {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub image_url: String,
    #[serde(flatten)]
    pub payload: GamePayload,
}
