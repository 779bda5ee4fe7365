//! Form configuration.

use std::time::Duration;

/// Store key of the submitted snapshot.
pub const SUBMISSION_KEY: &str = "registrationData";
/// Store key of the submission timestamp.
pub const TIMESTAMP_KEY: &str = "submissionTimestamp";
/// Store key of the autosaved draft.
pub const DRAFT_KEY: &str = "formDraft";

/// Quiet period before a draft is written.
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(2);

/// Per-form configuration.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Whether edits schedule a draft save.
    pub autosave: bool,

    /// Quiet period after the last edit before the draft is written.
    pub autosave_delay: Duration,

    pub submission_key: String,
    pub timestamp_key: String,
    pub draft_key: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            autosave: true,
            autosave_delay: AUTOSAVE_DELAY,
            submission_key: SUBMISSION_KEY.to_string(),
            timestamp_key: TIMESTAMP_KEY.to_string(),
            draft_key: DRAFT_KEY.to_string(),
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn draft autosave off.
    pub fn without_autosave(mut self) -> Self {
        self.autosave = false;
        self
    }

    /// Set the autosave quiet period.
    pub fn autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    /// Prefix every store key, so several forms can share one store.
    pub fn key_prefix(mut self, prefix: &str) -> Self {
        self.submission_key = format!("{prefix}{}", self.submission_key);
        self.timestamp_key = format!("{prefix}{}", self.timestamp_key);
        self.draft_key = format!("{prefix}{}", self.draft_key);
        self
    }
}
