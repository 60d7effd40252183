//! Two-phase generation: classify the source, then synthesise content from it.

use std::sync::Arc;

use super::{ApiSource, GenerativeApi, Source};
use crate::errors::AppError;
use crate::models::{Analysis, GamePayload, RpgData, WebAppData};

/// Generated content together with the analysis used for the completion summary.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub payload: GamePayload,
    pub analysis: Analysis,
}

/// Progress callback for user-facing loading messages.
pub type ProgressFn<'a> = &'a (dyn Fn(&str) + Send + Sync);

/// Runs a generation request against the generative API.
///
/// Calls are strictly sequential; the first failure aborts the request and nothing partial is kept.
#[derive(Clone)]
pub struct Orchestrator {
    api: Arc<dyn GenerativeApi>,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn GenerativeApi>) -> Self {
        Self { api }
    }

    pub async fn generate(
        &self,
        source: &Source,
        prompt_template: &str,
        progress: ProgressFn<'_>,
    ) -> Result<GenerationOutcome, AppError> {
        // Analysis phase
        let (api_source, analysis, is_narrative) = match source {
            Source::Url(url) => {
                progress("Analyzing video...");
                let validation = self.api.validate_url(url).await?;
                if !validation.is_valid {
                    return Err(AppError::InvalidSource(
                        validation
                            .error
                            .unwrap_or_else(|| "Invalid YouTube URL".to_string()),
                    ));
                }
                let api_source = ApiSource::Url(url.clone());
                let analysis = self.api.analyze(&api_source).await?;
                progress("Checking content structure...");
                let is_narrative = self.api.classify_narrative(&api_source).await?;
                (api_source, analysis, is_narrative)
            }
            Source::File(file) => {
                progress("Analyzing PDF document...");
                let api_source = ApiSource::File(file.encode());
                let analysis = self.api.analyze(&api_source).await?;
                progress("Checking content structure...");
                let is_narrative = self.api.classify_narrative(&api_source).await?;
                (api_source, analysis, is_narrative)
            }
            Source::Text { learned, goal } => {
                progress("Analyzing your learning goals...");
                let analysis = text_analysis(learned, goal);
                let api_source = ApiSource::Text(format!("Assumed: {}. Goal: {}", learned, goal));
                let is_narrative = self.api.classify_narrative(&api_source).await?;
                (api_source, analysis, is_narrative)
            }
        };

        tracing::info!(
            source = source.kind(),
            is_narrative,
            "Source analysis complete"
        );

        // Synthesis phase
        let payload = if is_narrative {
            progress("Building your interactive lesson...");
            let data = self.api.generate_narrative(&analysis, &api_source).await?;
            GamePayload::Rpg(validate_narrative(data)?)
        } else if let Source::Url(url) = source {
            progress("Building your interactive app...");
            let spec = self.api.generate_app_spec(url, prompt_template).await?;
            let code = self.api.generate_app_code(&spec).await?;
            GamePayload::WebApp(WebAppData { spec, code })
        } else {
            return Err(AppError::UnsupportedSynthesis);
        };

        Ok(GenerationOutcome { payload, analysis })
    }
}

/// Local analysis for free-text sources.
pub fn text_analysis(learned: &str, goal: &str) -> Analysis {
    Analysis {
        assumed_knowledge: learned.split(',').map(|s| s.trim().to_string()).collect(),
        learning_goal: goal.to_string(),
    }
}

fn validate_narrative(data: RpgData) -> Result<RpgData, AppError> {
    if data.scenes.is_empty() {
        return Err(AppError::GenerationFailure(
            "The generated lesson contains no scenes".to_string(),
        ));
    }
    Ok(data)
}
