//! Pending generation request and its one-source-at-a-time policy.

use serde::Serialize;

use crate::errors::AppError;
use crate::generation::{FileSource, Source, PDF_MIME_TYPE};
use crate::scenarios::DraftView;

/// Input channels of the draft. Learned and goal text together form one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    Url,
    File,
    Text,
}

/// The pending generation request.
///
/// At most one channel carries content at any time; setting a locked channel is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDraft {
    url: String,
    file: Option<FileSource>,
    learned: String,
    goal: String,
}

impl InputDraft {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn file(&self) -> Option<&FileSource> {
        self.file.as_ref()
    }

    pub fn learned(&self) -> &str {
        &self.learned
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    fn channel_in_use(&self, channel: InputChannel) -> bool {
        match channel {
            InputChannel::Url => !self.url.is_empty(),
            InputChannel::File => self.file.is_some(),
            InputChannel::Text => !self.learned.is_empty() || !self.goal.is_empty(),
        }
    }

    /// Whether another channel already carries content.
    pub fn is_locked(&self, channel: InputChannel) -> bool {
        [InputChannel::Url, InputChannel::File, InputChannel::Text]
            .into_iter()
            .filter(|other| *other != channel)
            .any(|other| self.channel_in_use(other))
    }

    fn ensure_unlocked(&self, channel: InputChannel, value_is_empty: bool) -> Result<(), AppError> {
        if !value_is_empty && self.is_locked(channel) {
            return Err(AppError::InputLocked(
                "Only one source can be used at a time; clear the other input first".to_string(),
            ));
        }
        Ok(())
    }

    pub fn set_url(&mut self, value: impl Into<String>) -> Result<(), AppError> {
        let value = value.into();
        self.ensure_unlocked(InputChannel::Url, value.is_empty())?;
        self.url = value;
        Ok(())
    }

    pub fn set_learned(&mut self, value: impl Into<String>) -> Result<(), AppError> {
        let value = value.into();
        self.ensure_unlocked(InputChannel::Text, value.is_empty())?;
        self.learned = value;
        Ok(())
    }

    pub fn set_goal(&mut self, value: impl Into<String>) -> Result<(), AppError> {
        let value = value.into();
        self.ensure_unlocked(InputChannel::Text, value.is_empty())?;
        self.goal = value;
        Ok(())
    }

    /// Attach an upload. Anything but a PDF is rejected and clears the file slot.
    pub fn attach_file(&mut self, file: FileSource) -> Result<(), AppError> {
        self.ensure_unlocked(InputChannel::File, false)?;
        if file.mime_type != PDF_MIME_TYPE {
            self.file = None;
            return Err(AppError::InvalidSource("Please upload a PDF file.".to_string()));
        }
        self.file = Some(file);
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Resolve the draft into the source of a generation request.
    pub fn source(&self) -> Result<Source, AppError> {
        if !self.url.trim().is_empty() {
            return Ok(Source::Url(self.url.trim().to_string()));
        }
        if let Some(file) = &self.file {
            return Ok(Source::File(file.clone()));
        }
        if !self.learned.trim().is_empty() && !self.goal.trim().is_empty() {
            return Ok(Source::Text {
                learned: self.learned.clone(),
                goal: self.goal.clone(),
            });
        }
        Err(AppError::MissingInput)
    }

    pub fn view(&self) -> DraftView<'_> {
        DraftView {
            url: &self.url,
            file_name: self.file.as_ref().map(|file| file.name.as_str()),
            learned: &self.learned,
            goal: &self.goal,
        }
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            url: self.url.clone(),
            file: self.file.as_ref().map(|file| FileSummary {
                name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                size: file.bytes.len(),
            }),
            learned: self.learned.clone(),
            goal: self.goal.clone(),
            locked: LockedChannels {
                url: self.is_locked(InputChannel::Url),
                file: self.is_locked(InputChannel::File),
                text: self.is_locked(InputChannel::Text),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub name: String,
    pub mime_type: String,
    pub size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LockedChannels {
    pub url: bool,
    pub file: bool,
    pub text: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftSnapshot {
    pub url: String,
    pub file: Option<FileSummary>,
    pub learned: String,
    pub goal: String,
    pub locked: LockedChannels,
}
