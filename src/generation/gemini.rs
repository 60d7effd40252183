//! Gemini REST client implementing the generative API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiSource, GenerativeApi};
use crate::errors::AppError;
use crate::models::{Analysis, RpgData};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const ANALYSIS_PROMPT: &str = "You are an expert teacher. Study the attached learning material. \
List the prior knowledge a learner needs before studying it, and state the single main learning goal. \
Respond with a JSON object: {\"assumedKnowledge\": [string], \"learningGoal\": string}.";

const NARRATIVE_CHECK_PROMPT: &str = "Decide whether the following learning material is narrative or sequential, \
meaning its ideas build on each other in an order that can be told as a story with successive steps. \
Respond with a JSON object: {\"isNarrative\": boolean}.";

const CODE_PROMPT: &str = "You are an expert web developer. Implement the following spec as a single, \
self-contained HTML file with all styles and scripts inline. Respond with the HTML only.";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// Creates a client; without a key every call fails with a generation error.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    fn source_part(source: &ApiSource) -> Part {
        match source {
            ApiSource::Url(url) => Part::FileData {
                file_data: FileDataPayload {
                    file_uri: url.clone(),
                },
            },
            ApiSource::File(file) => Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: file.mime_type.clone(),
                    data: file.data.clone(),
                },
            },
            ApiSource::Text(text) => Part::Text { text: text.clone() },
        }
    }

    async fn send_request(&self, parts: Vec<Part>, json_output: bool) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::GenerationFailure("GEMINI_API_KEY is not configured".to_string())
        })?;

        let url = format!("{}/{}:generateContent", BASE_URL, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: json_output.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::GenerationFailure(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }

    async fn request_json<T: DeserializeOwned>(&self, parts: Vec<Part>) -> Result<T, AppError> {
        let text = self.send_request(parts, true).await?;
        serde_json::from_str(strip_code_fences(&text)).map_err(|err| {
            tracing::warn!("Gemini returned malformed JSON: {}", err);
            AppError::GenerationFailure(format!("The model returned malformed JSON: {err}"))
        })
    }
}

#[async_trait]
impl GenerativeApi for GeminiClient {
    async fn analyze(&self, source: &ApiSource) -> Result<Analysis, AppError> {
        let parts = vec![
            Self::source_part(source),
            Part::Text {
                text: ANALYSIS_PROMPT.to_string(),
            },
        ];
        self.request_json(parts).await
    }

    async fn classify_narrative(&self, source: &ApiSource) -> Result<bool, AppError> {
        let parts = vec![
            Part::Text {
                text: NARRATIVE_CHECK_PROMPT.to_string(),
            },
            Self::source_part(source),
        ];
        let verdict: NarrativeVerdict = self.request_json(parts).await?;
        Ok(verdict.is_narrative)
    }

    async fn generate_narrative(
        &self,
        analysis: &Analysis,
        source: &ApiSource,
    ) -> Result<RpgData, AppError> {
        let prompt = narrative_prompt(analysis);
        let parts = match source {
            // Free-text sources are fully described by the analysis.
            ApiSource::Text(_) => vec![Part::Text { text: prompt }],
            other => vec![Self::source_part(other), Part::Text { text: prompt }],
        };
        self.request_json(parts).await
    }

    async fn generate_app_spec(&self, url: &str, prompt_template: &str) -> Result<String, AppError> {
        let parts = vec![
            Self::source_part(&ApiSource::Url(url.to_string())),
            Part::Text {
                text: prompt_template.to_string(),
            },
        ];
        let response: SpecResponse = self.request_json(parts).await?;
        Ok(response.spec)
    }

    async fn generate_app_code(&self, spec: &str) -> Result<String, AppError> {
        let parts = vec![Part::Text {
            text: format!("{CODE_PROMPT}\n\n{spec}"),
        }];
        let text = self.send_request(parts, false).await?;
        Ok(strip_code_fences(&text).to_string())
    }
}

fn narrative_prompt(analysis: &Analysis) -> String {
    format!(
        "Create an interactive, story-driven lesson (a short text RPG) for a learner who already knows: {known}. \
The lesson must lead them to understand: {goal}. \
Write 4 to 6 scenes. Each scene presents part of the story and a question with 2 to 4 options, exactly one correct, \
each with feedback explaining why it is right or wrong. Scenes link through nextSceneId; the last scene has nextSceneId null. \
Respond with a JSON object: {{\"title\": string, \"scenes\": [{{\"id\": string, \"title\": string, \"narrative\": string, \
\"challenge\": string, \"options\": [{{\"text\": string, \"isCorrect\": boolean, \"feedback\": string}}], \"nextSceneId\": string | null}}]}}.",
        known = analysis.assumed_knowledge.join(", "),
        goal = analysis.learning_goal,
    )
}

/// Remove a surrounding markdown code fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NarrativeVerdict {
    is_narrative: bool,
}

#[derive(Deserialize)]
struct SpecResponse {
    spec: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileDataPayload {
    file_uri: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, AppError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            AppError::GenerationFailure(
                "Gemini API returned no text in the response candidates".into(),
            )
        })
}

fn map_http_error(status: StatusCode, body: String) -> AppError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    tracing::error!("Gemini API returned {}: {}", status, message);
    AppError::GenerationFailure(message)
}
