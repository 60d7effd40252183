//! Narrative playthrough: pick an option, read the feedback, continue.

use crate::errors::AppError;
use crate::models::{GameStatus, RpgData, RpgProgress, RpgScene};

/// A narrative lesson being played.
#[derive(Debug, Clone, PartialEq)]
pub struct Playthrough {
    data: RpgData,
    progress: RpgProgress,
}

impl Playthrough {
    pub fn new(data: RpgData) -> Self {
        Self {
            data,
            progress: RpgProgress::default(),
        }
    }

    pub fn data(&self) -> &RpgData {
        &self.data
    }

    pub fn progress(&self) -> &RpgProgress {
        &self.progress
    }

    pub fn current_scene(&self) -> Option<&RpgScene> {
        self.data.scenes.get(self.progress.current_scene_index)
    }

    fn ensure_playing(&self) -> Result<(), AppError> {
        if self.progress.status == GameStatus::Victory {
            return Err(AppError::InvalidState(
                "The lesson is complete; save it or exit".to_string(),
            ));
        }
        Ok(())
    }

    /// Record the chosen option and show its feedback. The scene does not advance yet.
    pub fn choose(&mut self, option_index: usize) -> Result<(), AppError> {
        self.ensure_playing()?;
        if self.progress.last_choice.is_some() {
            return Err(AppError::InvalidState(
                "Continue past the current feedback first".to_string(),
            ));
        }

        let option = self
            .current_scene()
            .and_then(|scene| scene.options.get(option_index))
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("Option {} does not exist", option_index)))?;

        self.progress.feedback = Some(option.feedback.clone());
        self.progress.last_choice = Some(option);
        Ok(())
    }

    /// Acknowledge the feedback.
    ///
    /// A correct choice advances (or wins on the final scene); an incorrect one retries the scene.
    pub fn continue_on(&mut self) -> Result<(), AppError> {
        self.ensure_playing()?;
        let choice = self
            .progress
            .last_choice
            .take()
            .ok_or_else(|| AppError::InvalidState("Choose an option first".to_string()))?;

        if !choice.is_correct {
            self.progress.feedback = None;
            return Ok(());
        }

        let next_scene_id = self
            .current_scene()
            .and_then(|scene| scene.next_scene_id.clone());

        match next_scene_id {
            None => {
                // Feedback of the winning choice stays visible on the victory screen.
                self.progress.last_choice = Some(choice);
                self.progress.status = GameStatus::Victory;
            }
            Some(next_id) => {
                self.progress.current_scene_index = match self.data.scene_index(&next_id) {
                    Some(index) => index,
                    None => {
                        tracing::warn!(
                            next_scene_id = %next_id,
                            "Scene not found in lesson, restarting from the first scene"
                        );
                        0
                    }
                };
                self.progress.feedback = None;
            }
        }
        Ok(())
    }
}
