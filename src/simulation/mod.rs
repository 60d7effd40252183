//! Timeline strategy simulation shown in the `ww2game` view.
//!
//! The player picks a nation, then walks a fixed sequence of historical events. Events may offer
//! decisions to specific nations and repaint the map as territory changes hands.

mod data;

pub use data::*;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;

const HISTORICAL_PATH_TEXT: &str = "This was the historical path taken.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationPhase {
    SelectCountry,
    Event,
    Feedback,
    GameOver,
}

/// Consequence of a decision and what actually happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationFeedback {
    pub consequence: String,
    pub reality: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSimulation {
    phase: SimulationPhase,
    player_country: Option<&'static Country>,
    event_index: usize,
    map_colors: BTreeMap<&'static str, &'static str>,
    feedback: Option<SimulationFeedback>,
}

/// Serializable view of the simulation for clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub phase: SimulationPhase,
    pub player_country: Option<&'static Country>,
    pub event_index: usize,
    pub current_event: &'static TimelineEvent,
    pub is_interactive: bool,
    pub map_colors: BTreeMap<&'static str, &'static str>,
    pub feedback: Option<SimulationFeedback>,
    pub playable_countries: Vec<&'static Country>,
}

impl Default for HistoricalSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoricalSimulation {
    pub fn new() -> Self {
        Self {
            phase: SimulationPhase::SelectCountry,
            player_country: None,
            event_index: 0,
            map_colors: initial_map_colors(),
            feedback: None,
        }
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn event_index(&self) -> usize {
        self.event_index
    }

    pub fn map_color(&self, country_id: &str) -> Option<&'static str> {
        self.map_colors.get(country_id).copied()
    }

    fn current_event(&self) -> &'static TimelineEvent {
        &TIMELINE[self.event_index]
    }

    /// Whether the player decides the current event rather than watching it.
    pub fn is_interactive(&self) -> bool {
        match self.player_country {
            Some(country) => {
                let event = self.current_event();
                event.interactive_for.contains(&country.id) && !event.choices.is_empty()
            }
            None => false,
        }
    }

    pub fn select_country(&mut self, country_id: &str) -> Result<(), AppError> {
        if self.phase != SimulationPhase::SelectCountry {
            return Err(AppError::InvalidState(
                "A nation has already been chosen".to_string(),
            ));
        }
        let country = find_country(country_id)
            .filter(|country| country.playable)
            .ok_or_else(|| AppError::NotFound(format!("Playable country {} not found", country_id)))?;

        self.player_country = Some(country);
        self.phase = SimulationPhase::Event;
        Ok(())
    }

    pub fn choose(&mut self, choice_index: usize) -> Result<(), AppError> {
        if self.phase != SimulationPhase::Event || !self.is_interactive() {
            return Err(AppError::InvalidState(
                "There is no decision to make right now".to_string(),
            ));
        }
        let choice = self
            .current_event()
            .choices
            .get(choice_index)
            .ok_or_else(|| AppError::Validation(format!("Choice {} does not exist", choice_index)))?;

        let consequence = if choice.consequence == "N/A" {
            HISTORICAL_PATH_TEXT.to_string()
        } else {
            choice.consequence.to_string()
        };
        self.feedback = Some(SimulationFeedback {
            consequence,
            reality: choice.reality.to_string(),
        });
        self.phase = SimulationPhase::Feedback;
        Ok(())
    }

    /// Advance the timeline from a watched event or acknowledged feedback.
    pub fn continue_timeline(&mut self) -> Result<(), AppError> {
        match self.phase {
            SimulationPhase::Feedback => self.feedback = None,
            SimulationPhase::Event if !self.is_interactive() => {}
            SimulationPhase::Event => {
                return Err(AppError::InvalidState(
                    "Make a decision before continuing".to_string(),
                ))
            }
            _ => {
                return Err(AppError::InvalidState(
                    "The timeline cannot advance from here".to_string(),
                ))
            }
        }

        let next_index = self.event_index + 1;
        if next_index >= TIMELINE.len() {
            self.phase = SimulationPhase::GameOver;
            return Ok(());
        }

        for change in TIMELINE[next_index].map_changes {
            if let Some(owner) = find_country(change.new_owner_id) {
                self.map_colors.insert(change.country_id, owner.color);
            }
        }
        self.event_index = next_index;
        self.phase = SimulationPhase::Event;
        Ok(())
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            phase: self.phase,
            player_country: self.player_country,
            event_index: self.event_index,
            current_event: self.current_event(),
            is_interactive: self.is_interactive(),
            map_colors: self.map_colors.clone(),
            feedback: self.feedback.clone(),
            playable_countries: COUNTRIES.iter().filter(|c| c.playable).collect(),
        }
    }
}

fn initial_map_colors() -> BTreeMap<&'static str, &'static str> {
    COUNTRIES.iter().map(|c| (c.id, c.color)).collect()
}
