//! Content generation: the generative API capability and the two-phase orchestrator.

mod gemini;
mod orchestrator;
mod youtube;

pub use gemini::*;
pub use orchestrator::*;
pub use youtube::*;

#[cfg(test)]
pub(crate) use orchestrator::fake;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Analysis, RpgData};

/// The only file type accepted as a source.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// An uploaded document as received from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSource {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileSource {
    /// Base64 payload sent to the generative API.
    pub fn encode(&self) -> EncodedFile {
        EncodedFile {
            mime_type: self.mime_type.clone(),
            data: BASE64_STANDARD.encode(&self.bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFile {
    pub mime_type: String,
    pub data: String,
}

/// The one source a generation request is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Url(String),
    File(FileSource),
    Text { learned: String, goal: String },
}

impl Source {
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Url(_) => "url",
            Source::File(_) => "file",
            Source::Text { .. } => "text",
        }
    }
}

/// Source material in the form the generative API consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiSource {
    Url(String),
    File(EncodedFile),
    Text(String),
}

/// Result of validating a source URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UrlValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

/// Operations consumed from the external generative service.
#[async_trait]
pub trait GenerativeApi: Send + Sync {
    async fn validate_url(&self, url: &str) -> Result<UrlValidation, AppError> {
        Ok(validate_youtube_url(url))
    }

    async fn analyze(&self, source: &ApiSource) -> Result<Analysis, AppError>;

    async fn classify_narrative(&self, source: &ApiSource) -> Result<bool, AppError>;

    async fn generate_narrative(
        &self,
        analysis: &Analysis,
        source: &ApiSource,
    ) -> Result<RpgData, AppError>;

    async fn generate_app_spec(&self, url: &str, prompt_template: &str) -> Result<String, AppError>;

    async fn generate_app_code(&self, spec: &str) -> Result<String, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_payload_is_base64() {
        let file = FileSource {
            name: "notes.pdf".into(),
            mime_type: PDF_MIME_TYPE.into(),
            bytes: b"%PDF".to_vec(),
        };
        let encoded = file.encode();
        assert_eq!(encoded.data, "JVBERg==");
        assert_eq!(encoded.mime_type, PDF_MIME_TYPE);
    }
}
