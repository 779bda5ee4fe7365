pub mod autosave;
pub mod clock;
pub mod config;
pub mod confirm;
pub mod dom;
pub mod event;
pub mod field;
pub mod form;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod validation;

pub use autosave::DraftAutosave;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::FormConfig;
pub use confirm::Confirm;
pub use dom::{Document, Element, FieldValue};
pub use event::{EventOutcome, FormEvent};
pub use field::{FieldKind, FieldRegistry, FieldSpec};
pub use form::{RegistrationForm, SubmitOutcome, SubmitStep};
pub use snapshot::{FormSnapshot, SnapshotValue};
pub use store::{Store, StoreError};
pub use validation::{FieldError, FormReport, ValidationResult};
