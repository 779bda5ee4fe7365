//! The registration form: decides when each field is judged, keeps the error
//! display in step with the verdicts, and captures submissions and drafts.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::autosave::DraftAutosave;
use crate::clock::{Clock, SystemClock};
use crate::config::FormConfig;
use crate::confirm::Confirm;
use crate::dom::{Control, Document, FieldValue};
use crate::event::{EventOutcome, FormEvent};
use crate::field::{FieldKind, FieldRegistry, FieldSpec, FORM_ID, HIDDEN_CLASS, SUCCESS_ID};
use crate::report::{self, error_element_id, ERROR_CLASS};
use crate::snapshot::FormSnapshot;
use crate::store::Store;
use crate::validation::{format_phone_number, normalize_zip, FieldError, FormReport};

/// Prompt shown before clearing the form.
pub const CLEAR_PROMPT: &str =
    "Are you sure you want to clear the form? All entered data will be lost.";

/// One pass of whole-form validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStep {
    RequiredFields,
    Email,
    Phones,
    Zip,
    Gpa,
    Names,
    GenderSelected,
    DateOfBirth,
    TermsAccepted,
}

impl SubmitStep {
    /// Order the steps run in on submission.
    pub const SEQUENCE: [SubmitStep; 9] = [
        SubmitStep::RequiredFields,
        SubmitStep::Email,
        SubmitStep::Phones,
        SubmitStep::Zip,
        SubmitStep::Gpa,
        SubmitStep::Names,
        SubmitStep::GenderSelected,
        SubmitStep::DateOfBirth,
        SubmitStep::TermsAccepted,
    ];

    /// Field kind this step judges; `None` for the required sweep.
    pub fn kind(self) -> Option<FieldKind> {
        match self {
            Self::RequiredFields => None,
            Self::Email => Some(FieldKind::Email),
            Self::Phones => Some(FieldKind::Phone),
            Self::Zip => Some(FieldKind::Zip),
            Self::Gpa => Some(FieldKind::Gpa),
            Self::Names => Some(FieldKind::Name),
            Self::GenderSelected => Some(FieldKind::Radio),
            Self::DateOfBirth => Some(FieldKind::DateOfBirth),
            Self::TermsAccepted => Some(FieldKind::Checkbox),
        }
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Every step passed; the snapshot was captured and handed to the store.
    Accepted {
        snapshot: FormSnapshot,
        submitted_at: DateTime<Utc>,
    },
    /// At least one field failed; nothing was persisted.
    Rejected {
        report: FormReport,
        /// Field scrolled into view.
        first_invalid: Option<String>,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

pub struct RegistrationForm {
    registry: FieldRegistry,
    doc: Document,
    clock: Box<dyn Clock>,
    store: Store,
    config: FormConfig,
    autosave: Option<DraftAutosave>,
}

impl RegistrationForm {
    /// Student registration form with default configuration.
    pub fn new(store: Store) -> Self {
        let registry = FieldRegistry::student_registration();
        let doc = registry.document();
        let mut form = Self {
            registry,
            doc,
            clock: Box::new(SystemClock),
            store,
            config: FormConfig::default(),
            autosave: None,
        };
        form.autosave = form.build_autosave();
        form
    }

    /// Use a different field set. The document is rebuilt from it.
    pub fn with_registry(mut self, registry: FieldRegistry) -> Self {
        self.doc = registry.document();
        self.registry = registry;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self.autosave = self.build_autosave();
        self
    }

    fn build_autosave(&self) -> Option<DraftAutosave> {
        self.config.autosave.then(|| {
            DraftAutosave::new(
                self.store.clone(),
                &self.config.draft_key,
                self.config.autosave_delay,
            )
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether the success state is showing.
    pub fn is_submitted(&self) -> bool {
        self.doc.has_class(FORM_ID, HIDDEN_CLASS)
            && !self.doc.has_class(SUCCESS_ID, HIDDEN_CLASS)
    }

    /// Whether the field is currently shown as invalid.
    pub fn is_flagged(&self, field_id: &str) -> bool {
        report::is_flagged(&self.doc, field_id)
    }

    /// Ids of every field currently shown as invalid, in form order.
    pub fn flagged_fields(&self) -> Vec<&str> {
        self.registry
            .iter()
            .filter(|spec| self.is_flagged(&spec.id))
            .map(|spec| spec.id.as_str())
            .collect()
    }

    // =========================================================================
    // Field events
    // =========================================================================

    /// The user typed into a field; `text` is its full new content.
    ///
    /// Phone numbers are reformatted and postal codes upper-cased first. The
    /// field is judged only once enough has been typed; before that its error
    /// state is cleared. Returns the field's validity.
    pub fn on_input(&mut self, field_id: &str, text: &str) -> bool {
        let Some(spec) = self.registry.get(field_id) else {
            log::debug!("[form] input for unregistered field {}", field_id);
            return true;
        };

        let text = match spec.kind {
            FieldKind::Phone => format_phone_number(text),
            FieldKind::Zip => normalize_zip(text),
            _ => text.to_string(),
        };
        let policy = spec.kind.edit_policy();
        self.doc.set_value(field_id, FieldValue::Text(text.clone()));

        let valid = if policy.ready(&text) {
            self.validate_field(field_id)
        } else {
            report::report(&mut self.doc, field_id, true, None)
        };
        self.schedule_autosave();
        valid
    }

    /// The field lost focus.
    ///
    /// Non-empty fields are judged; empty required fields are flagged without
    /// a custom message; empty optional fields are cleared.
    pub fn on_blur(&mut self, field_id: &str) -> bool {
        let Some(spec) = self.registry.get(field_id) else {
            log::debug!("[form] blur for unregistered field {}", field_id);
            return true;
        };

        let required = spec.required;

        let empty = self.doc.value(field_id).is_none_or(FieldValue::is_empty);
        if !empty {
            self.validate_field(field_id)
        } else {
            report::report(&mut self.doc, field_id, !required, None)
        }
    }

    /// A selection field (select, radio group, checkbox, multi-select)
    /// changed.
    pub fn on_change(&mut self, field_id: &str, value: FieldValue) -> bool {
        if !self.doc.set_value(field_id, value) {
            log::debug!("[form] change for missing element {}", field_id);
            return true;
        }
        let valid = self.validate_field(field_id);
        self.schedule_autosave();
        valid
    }

    /// Judge one field now and update its error display.
    ///
    /// Empty typed fields are cleared rather than judged; required checks
    /// flag them on blur or submission.
    pub fn validate_field(&mut self, field_id: &str) -> bool {
        let today = self.clock.today();
        let Some(spec) = self.registry.get(field_id) else {
            return true;
        };
        let Some(value) = self.doc.value(field_id) else {
            return true;
        };

        if is_typed(spec) && value.is_empty() {
            return report::report(&mut self.doc, field_id, true, None);
        }

        let verdict = spec.check(value, today);
        log::debug!("[form] {} valid={}", field_id, verdict.is_valid());
        report::report(&mut self.doc, field_id, verdict.is_valid(), verdict.message())
    }

    /// Route an event to the matching handler.
    pub async fn dispatch(&mut self, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::Input { target, text } => {
                let valid = self.on_input(&target, &text);
                EventOutcome::Field { target, valid }
            }
            FormEvent::Blur { target } => {
                let valid = self.on_blur(&target);
                EventOutcome::Field { target, valid }
            }
            FormEvent::Change { target, value } => {
                let valid = self.on_change(&target, value);
                EventOutcome::Field { target, valid }
            }
            FormEvent::Submit => EventOutcome::Submitted(self.submit().await),
        }
    }

    // =========================================================================
    // Whole-form validation and submission
    // =========================================================================

    /// Run every submission step and report the failing fields.
    ///
    /// All error state is cleared first, then each step runs regardless of
    /// earlier failures.
    pub fn validate_all(&mut self) -> FormReport {
        let today = self.clock.today();
        report::clear_all(&mut self.doc);

        let passed = SubmitStep::SEQUENCE
            .iter()
            .fold(true, |ok, &step| self.run_step(step, today) && ok);

        let errors: Vec<FieldError> = self
            .registry
            .iter()
            .filter(|spec| report::is_flagged(&self.doc, &spec.id))
            .map(|spec| FieldError {
                field_id: spec.id.clone(),
                label: spec.label.clone(),
                message: self
                    .doc
                    .get(&error_element_id(&spec.id))
                    .map(|e| e.text.clone())
                    .unwrap_or_else(|| spec.error_text.clone()),
            })
            .collect();

        log::debug!("[form] whole-form validation passed={}", passed);
        FormReport::from_errors(errors)
    }

    fn run_step(&mut self, step: SubmitStep, today: NaiveDate) -> bool {
        let mut ok = true;
        match step.kind() {
            None => {
                for spec in self.registry.iter().filter(|s| s.in_required_sweep()) {
                    let empty = self.doc.value(&spec.id).is_none_or(FieldValue::is_empty);
                    if empty {
                        ok &= report::report(&mut self.doc, &spec.id, false, None);
                    }
                }
            }
            Some(kind) => {
                for spec in self.registry.of_kind(kind) {
                    let Some(value) = self.doc.value(&spec.id) else {
                        continue;
                    };
                    if is_typed(spec) && value.is_empty() {
                        continue;
                    }
                    let verdict = spec.check(value, today);
                    ok &= report::report(
                        &mut self.doc,
                        &spec.id,
                        verdict.is_valid(),
                        verdict.message(),
                    );
                }
            }
        }
        ok
    }

    /// Validate everything and, if it all passes, capture and persist the
    /// submission and show the success state.
    ///
    /// On failure the first flagged field is scrolled into view and focused.
    /// Store failures are logged; the submission still counts as accepted.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let report = self.validate_all();
        if report.is_invalid() {
            let first_invalid = self.doc.first_with_class(ERROR_CLASS).map(|e| e.id.clone());
            if let Some(id) = &first_invalid {
                self.doc.scroll_into_view(id);
            }
            log::info!(
                "[form] submission rejected, {} field(s) invalid",
                report.errors().len()
            );
            return SubmitOutcome::Rejected {
                report,
                first_invalid,
            };
        }

        let snapshot = self.capture_snapshot();
        let submitted_at = self.clock.now();
        log::info!("[form] submission accepted:\n{}", snapshot.to_pretty_json());

        if let Err(e) = self.store.set(&self.config.submission_key, &snapshot).await {
            log::warn!("[form] failed to persist submission: {}", e);
        }
        let timestamp = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        if let Err(e) = self.store.set(&self.config.timestamp_key, &timestamp).await {
            log::warn!("[form] failed to persist submission timestamp: {}", e);
        }
        self.discard_draft().await;

        self.doc.add_class(FORM_ID, HIDDEN_CLASS);
        self.doc.remove_class(SUCCESS_ID, HIDDEN_CLASS);

        SubmitOutcome::Accepted {
            snapshot,
            submitted_at,
        }
    }

    // =========================================================================
    // Page operations
    // =========================================================================

    /// Current values of every field.
    pub fn capture_snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(&self.registry, &self.doc)
    }

    /// Write a snapshot's values into the fields.
    ///
    /// Unknown ids are ignored. Checkboxes and radio groups missing from the
    /// snapshot are reset, since a capture leaves them out when empty.
    pub fn load_snapshot(&mut self, snapshot: &FormSnapshot) {
        for (key, _) in snapshot.iter() {
            if self.registry.get(key).is_none() {
                log::debug!("[form] snapshot key {} has no field", key);
            }
        }

        for spec in self.registry.iter() {
            match snapshot.get(&spec.id) {
                Some(value) => {
                    self.doc.set_value(&spec.id, value.clone().into());
                }
                None => {
                    if matches!(spec.kind.control(), Control::Checkbox | Control::RadioGroup) {
                        if let Some(element) = self.doc.get_mut(&spec.id) {
                            element.value = element.value.cleared();
                        }
                    }
                }
            }
        }
    }

    /// Log the current snapshot and return it as pretty JSON.
    pub fn print_snapshot(&self) -> String {
        let json = self.capture_snapshot().to_pretty_json();
        log::info!("[form] current form data:\n{}", json);
        json
    }

    /// Ask for confirmation, then empty every field, clear all error state
    /// and delete the draft. Returns whether the form was cleared.
    pub async fn clear_form(&mut self, confirm: &impl Confirm) -> bool {
        if !confirm.confirm(CLEAR_PROMPT) {
            return false;
        }
        self.reset_values();
        report::clear_all(&mut self.doc);
        self.discard_draft().await;
        log::info!("[form] form cleared");
        true
    }

    /// Leave the success state and start over with an empty form.
    pub fn reset_for_new_submission(&mut self) {
        if let Some(autosave) = self.autosave.as_mut() {
            autosave.cancel();
        }
        self.reset_values();
        report::clear_all(&mut self.doc);
        self.doc.remove_class(FORM_ID, HIDDEN_CLASS);
        self.doc.add_class(SUCCESS_ID, HIDDEN_CLASS);
    }

    /// Load the autosaved draft into the form. Returns whether one existed.
    pub async fn restore_draft(&mut self) -> bool {
        let Some(autosave) = self.autosave.as_ref() else {
            return false;
        };
        let draft = autosave.load().await;
        match draft {
            Some(draft) => {
                self.load_snapshot(&draft);
                log::info!("[form] draft restored ({} fields)", draft.len());
                true
            }
            None => false,
        }
    }

    /// Whether a draft save is waiting for its quiet period to end.
    pub fn autosave_pending(&self) -> bool {
        self.autosave.as_ref().is_some_and(DraftAutosave::is_pending)
    }

    fn schedule_autosave(&mut self) {
        let snapshot = self.capture_snapshot();
        if let Some(autosave) = self.autosave.as_mut() {
            autosave.schedule(snapshot);
        }
    }

    async fn discard_draft(&mut self) {
        if let Some(autosave) = self.autosave.as_mut() {
            autosave.discard().await;
        }
    }

    fn reset_values(&mut self) {
        for spec in self.registry.iter() {
            if let Some(element) = self.doc.get_mut(&spec.id) {
                element.value = element.value.cleared();
            }
        }
    }
}

/// Typed fields are judged on content; empty content is the required
/// check's business.
fn is_typed(spec: &FieldSpec) -> bool {
    matches!(spec.kind.control(), Control::TextInput | Control::TextArea)
}
