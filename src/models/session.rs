//! Navigation and progress enums shared by the session controller and the API.

use serde::{Deserialize, Serialize};

use super::RpgInteractionOption;

/// Top-level tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivePage {
    Generate,
    Library,
    Settings,
    TopRated,
    Community,
}

/// Sub-state of the generate tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Subjects,
    Inputs,
    Game,
    Webapp,
    Ww2game,
}

impl View {
    /// Views that display generated or curated content.
    pub fn is_content(&self) -> bool {
        matches!(self, View::Game | View::Webapp | View::Ww2game)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Victory,
}

/// What the learner is assumed to know and what the lesson should teach.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub assumed_knowledge: Vec<String>,
    pub learning_goal: String,
}

/// Position inside a narrative playthrough.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RpgProgress {
    pub current_scene_index: usize,
    pub feedback: Option<String>,
    pub last_choice: Option<RpgInteractionOption>,
    pub status: GameStatus,
}

impl Default for RpgProgress {
    fn default() -> Self {
        Self {
            current_scene_index: 0,
            feedback: None,
            last_choice: None,
            status: GameStatus::Playing,
        }
    }
}
