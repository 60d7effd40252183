//! Demo shortcuts that substitute a canned result for specific known inputs.
//!
//! The matcher is consulted before any real generation and can be switched off entirely.

use std::time::Duration;

use crate::catalog::{find_top_rated_by_name, GRAVITY_SLING, MONSTERS_BOUNTY};
use crate::models::CuratedGame;

/// Literal video URL that opens the historical simulation.
pub const SIMULATION_VIDEO_URL: &str = "https://www.youtube.com/watch?v=58XB0OvoGAI";

/// Draft fields a trigger can inspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftView<'a> {
    pub url: &'a str,
    pub file_name: Option<&'a str>,
    pub learned: &'a str,
    pub goal: &'a str,
}

/// Condition under which a scenario fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Exact uploaded file name.
    FileName(String),
    /// Both text fields, compared trimmed and case-insensitively.
    TextPair { learned: String, goal: String },
    /// Exact URL after trimming.
    Url(String),
}

impl Trigger {
    fn matches(&self, draft: &DraftView<'_>) -> bool {
        match self {
            Trigger::FileName(name) => draft.file_name == Some(name.as_str()),
            Trigger::TextPair { learned, goal } => {
                draft.learned.trim().to_lowercase() == *learned
                    && draft.goal.trim().to_lowercase() == *goal
            }
            Trigger::Url(url) => draft.url.trim() == url,
        }
    }
}

/// What a matched scenario produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioOutcome {
    PlayCurated(Box<CuratedGame>),
    HistoricalSimulation,
}

#[derive(Debug, Clone)]
pub struct ScenarioRule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub loading_message: &'static str,
    pub outcome: ScenarioOutcome,
}

/// A matched scenario, ready to be resolved after `delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub loading_message: &'static str,
    pub outcome: ScenarioOutcome,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct ScenarioMatcher {
    enabled: bool,
    delay: Duration,
    rules: Vec<ScenarioRule>,
}

impl ScenarioMatcher {
    pub fn new(enabled: bool, delay: Duration, rules: Vec<ScenarioRule>) -> Self {
        Self {
            enabled,
            delay,
            rules,
        }
    }

    /// The shipped demo shortcuts.
    pub fn with_demo_rules(enabled: bool, delay: Duration) -> Self {
        let mut rules = Vec::new();

        if let Some(game) = find_top_rated_by_name(MONSTERS_BOUNTY) {
            rules.push(ScenarioRule {
                name: "stat-310-lecture",
                trigger: Trigger::FileName("Stat 310 Lecture 1".to_string()),
                loading_message: "Analyzing your course material...",
                outcome: ScenarioOutcome::PlayCurated(Box::new(game)),
            });
        }

        if let Some(game) = find_top_rated_by_name(GRAVITY_SLING) {
            rules.push(ScenarioRule {
                name: "gravity-sling",
                trigger: Trigger::TextPair {
                    learned: "newton's law and calculus".to_string(),
                    goal: "momentum and kinetic energy".to_string(),
                },
                loading_message: "Calculating orbital mechanics...",
                outcome: ScenarioOutcome::PlayCurated(Box::new(game)),
            });
        }

        rules.push(ScenarioRule {
            name: "historical-simulation",
            trigger: Trigger::Url(SIMULATION_VIDEO_URL.to_string()),
            loading_message: "Initializing historical simulation...",
            outcome: ScenarioOutcome::HistoricalSimulation,
        });

        Self::new(enabled, delay, rules)
    }

    pub fn disabled() -> Self {
        Self::new(false, Duration::ZERO, Vec::new())
    }

    /// First rule whose trigger matches the draft.
    pub fn find(&self, draft: &DraftView<'_>) -> Option<Scenario> {
        if !self.enabled {
            return None;
        }

        self.rules
            .iter()
            .find(|rule| rule.trigger.matches(draft))
            .map(|rule| Scenario {
                name: rule.name,
                loading_message: rule.loading_message,
                outcome: rule.outcome.clone(),
                delay: self.delay,
            })
    }
}
