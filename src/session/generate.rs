//! Generation requests against the shared session.
//!
//! The controller is locked only to start a request and to apply its result. The slow external
//! work runs unlocked, so navigation stays possible meanwhile. Navigating away bumps the session
//! epoch, and a result that comes back under an older epoch is dropped.

use tracing::Instrument;
use uuid::Uuid;

use super::{ActiveContent, Playthrough, SessionController, SessionSnapshot, SharedSession};
use crate::errors::AppError;
use crate::generation::{GenerationOutcome, Orchestrator, Source};
use crate::models::{GamePayload, View};
use crate::scenarios::{Scenario, ScenarioMatcher, ScenarioOutcome};

const INITIAL_LOADING_MESSAGE: &str = "Preparing your request...";

/// Work to do once the session lock is released.
#[derive(Debug, Clone)]
pub enum GenerationJob {
    Scenario(Scenario),
    Generate {
        source: Source,
        prompt_template: String,
    },
}

/// An accepted generation request.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub epoch: u64,
    pub request_id: Uuid,
    pub job: GenerationJob,
}

/// Result of a finished job.
#[derive(Debug, Clone)]
pub enum JobResult {
    Generated(GenerationOutcome),
    Scenario(ScenarioOutcome),
}

impl SessionController {
    /// Accept a generation request from the inputs view and mark the session as loading.
    pub fn begin_generation(
        &mut self,
        matcher: &ScenarioMatcher,
    ) -> Result<GenerationTicket, AppError> {
        if self.session.is_loading {
            return Err(AppError::Busy);
        }
        if self.session.view != View::Inputs {
            return Err(AppError::InvalidState(
                "Generation starts from the inputs screen".to_string(),
            ));
        }

        let scenario = matcher.find(&self.session.inputs.view());
        let (job, loading_message) = match scenario {
            Some(scenario) => {
                let message = scenario.loading_message.to_string();
                (GenerationJob::Scenario(scenario), message)
            }
            None => {
                let source = self.session.inputs.source().inspect_err(|e| {
                    self.session.input_error = Some(e.inline_message());
                })?;
                let job = GenerationJob::Generate {
                    source,
                    prompt_template: self.data.settings.custom_prompt.clone(),
                };
                (job, INITIAL_LOADING_MESSAGE.to_string())
            }
        };

        self.session.epoch += 1;
        self.session.is_loading = true;
        self.session.loading_message = Some(loading_message);
        self.session.input_error = None;

        Ok(GenerationTicket {
            epoch: self.session.epoch,
            request_id: Uuid::new_v4(),
            job,
        })
    }

    /// Update the loading message of the request started under `epoch`.
    pub fn set_progress(&mut self, epoch: u64, message: &str) {
        if self.session.is_loading && self.session.epoch == epoch {
            self.session.loading_message = Some(message.to_string());
        }
    }

    /// Apply a finished job.
    ///
    /// Returns `Ok(false)` when the session has moved on since the request started. Failures
    /// return the session to idle with the error shown inline.
    pub fn complete_generation(
        &mut self,
        epoch: u64,
        result: Result<JobResult, AppError>,
    ) -> Result<bool, AppError> {
        if !self.session.is_loading || self.session.epoch != epoch {
            tracing::debug!(
                epoch,
                current = self.session.epoch,
                "Discarding result of abandoned generation"
            );
            return Ok(false);
        }

        self.session.is_loading = false;
        self.session.loading_message = None;

        match result {
            Ok(JobResult::Generated(outcome)) => {
                match outcome.payload {
                    GamePayload::Rpg(data) => {
                        self.session.content =
                            Some(ActiveContent::Lesson(Playthrough::new(data)));
                        self.session.view = View::Game;
                    }
                    GamePayload::WebApp(app) => {
                        self.session.content = Some(ActiveContent::App(app));
                        self.session.view = View::Webapp;
                    }
                }
                self.session.analysis = Some(outcome.analysis);
            }
            Ok(JobResult::Scenario(ScenarioOutcome::PlayCurated(game))) => {
                let game = *game;
                self.open_payload(&game.subject, game.payload);
            }
            Ok(JobResult::Scenario(ScenarioOutcome::HistoricalSimulation)) => {
                self.open_simulation();
            }
            Err(e) => {
                self.session.input_error = Some(e.inline_message());
                return Err(e);
            }
        }

        tracing::info!(view = ?self.session.view, "Generation applied");
        Ok(true)
    }
}

/// Run a generation request end to end and return the resulting snapshot.
pub async fn run_generation(
    shared: &SharedSession,
    orchestrator: &Orchestrator,
    matcher: &ScenarioMatcher,
) -> Result<SessionSnapshot, AppError> {
    let GenerationTicket {
        epoch,
        request_id,
        job,
    } = shared.lock().await.begin_generation(matcher)?;

    let span = tracing::info_span!("generation", %request_id, epoch);
    async move {
        let result = match job {
            GenerationJob::Scenario(scenario) => {
                tracing::info!(scenario = scenario.name, "Resolving demo scenario");
                tokio::time::sleep(scenario.delay).await;
                Ok(JobResult::Scenario(scenario.outcome))
            }
            GenerationJob::Generate {
                source,
                prompt_template,
            } => {
                tracing::info!(source = source.kind(), "Generation started");
                let progress_session = shared.clone();
                let progress = move |message: &str| {
                    // Skip the update rather than wait behind a handler holding the lock.
                    if let Ok(mut controller) = progress_session.try_lock() {
                        controller.set_progress(epoch, message);
                    }
                };
                orchestrator
                    .generate(&source, &prompt_template, &progress)
                    .await
                    .map(JobResult::Generated)
                    .inspect_err(|e| tracing::error!("Generation failed: {}", e))
            }
        };

        let mut controller = shared.lock().await;
        controller.complete_generation(epoch, result)?;
        Ok(controller.snapshot())
    }
    .instrument(span)
    .await
}
