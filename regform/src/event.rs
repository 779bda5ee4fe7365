//! Events the page feeds into the form.

use crate::dom::FieldValue;
use crate::form::SubmitOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Text typed into a field; `text` is the field's full new content.
    Input { target: String, text: String },
    /// Field lost focus.
    Blur { target: String },
    /// Selection field changed.
    Change { target: String, value: FieldValue },
    /// Form submitted.
    Submit,
}

impl FormEvent {
    pub fn input(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Input {
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn blur(target: impl Into<String>) -> Self {
        Self::Blur {
            target: target.into(),
        }
    }

    pub fn change(target: impl Into<String>, value: FieldValue) -> Self {
        Self::Change {
            target: target.into(),
            value,
        }
    }
}

/// What handling an event produced.
#[derive(Debug, Clone)]
pub enum EventOutcome {
    /// A field was (re)judged.
    Field { target: String, valid: bool },
    Submitted(SubmitOutcome),
}
