//! Declarative field registry.
//!
//! Each field is described once (id, kind, required flag, label) and the form
//! derives its validator, its edit trigger and its elements from that entry.
//!
//! ```
//! use regform::field::{FieldKind, FieldRegistry};
//!
//! let registry = FieldRegistry::new()
//!     .field("firstName", FieldKind::Name)
//!         .required()
//!         .label("First name")
//!     .field("email", FieldKind::Email)
//!         .required()
//!     .field("gpa", FieldKind::Gpa)
//!     .build();
//!
//! assert_eq!(registry.len(), 3);
//! assert!(registry.get("email").is_some_and(|f| f.required));
//! ```

use chrono::NaiveDate;

use crate::dom::{Control, Document, Element, FieldValue};
use crate::report::error_element_id;
use crate::validation::{
    check_date_of_birth, check_name, check_phone, digit_count, is_valid_email, is_valid_gpa,
    is_valid_zip, ValidationResult,
};

/// Id of the element wrapping the whole form.
pub const FORM_ID: &str = "registrationForm";
/// Id of the element shown after a successful submission.
pub const SUCCESS_ID: &str = "successMessage";
/// Class hiding an element.
pub const HIDDEN_CLASS: &str = "hidden";

/// What a field holds and therefore how it is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Zip,
    Gpa,
    DateOfBirth,
    /// Free text with no format rule (address, city).
    Text,
    /// Multi-line free text.
    LongText,
    Select,
    MultiSelect,
    Radio,
    Checkbox,
}

impl FieldKind {
    pub fn control(self) -> Control {
        match self {
            Self::LongText => Control::TextArea,
            Self::Select => Control::Select,
            Self::MultiSelect => Control::MultiSelect,
            Self::Radio => Control::RadioGroup,
            Self::Checkbox => Control::Checkbox,
            _ => Control::TextInput,
        }
    }

    /// When typing into this field should trigger validation.
    pub fn edit_policy(self) -> EditPolicy {
        match self {
            Self::Phone => EditPolicy::MinDigits(10),
            Self::Zip => EditPolicy::MinChars(3),
            Self::Select | Self::MultiSelect | Self::Radio | Self::Checkbox => EditPolicy::OnChange,
            _ => EditPolicy::NonEmpty,
        }
    }

    fn default_error_text(self) -> &'static str {
        match self {
            Self::Name => "Please enter a valid name",
            Self::Email => "Please enter a valid email address",
            Self::Phone => "Please enter a valid phone number",
            Self::Zip => "Please enter a valid ZIP or postal code",
            Self::Gpa => "GPA must be a number between 0.0 and 4.0",
            Self::DateOfBirth => "Please enter a valid date of birth",
            Self::Text | Self::LongText => "This field is required",
            Self::Select | Self::MultiSelect => "Please make a selection",
            Self::Radio => "Please select an option",
            Self::Checkbox => "This box must be checked",
        }
    }
}

/// Trigger rule for validating while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPolicy {
    /// Validate once the text holds at least this many digits.
    MinDigits(usize),
    /// Validate once the text holds at least this many characters.
    MinChars(usize),
    /// Validate as soon as anything is typed.
    NonEmpty,
    /// Not a typed field; validated on change events.
    OnChange,
}

impl EditPolicy {
    /// Whether `text` is complete enough to be judged.
    pub fn ready(self, text: &str) -> bool {
        match self {
            Self::MinDigits(n) => digit_count(text) >= n,
            Self::MinChars(n) => text.chars().count() >= n,
            Self::NonEmpty | Self::OnChange => !text.trim().is_empty(),
        }
    }
}

/// One entry of the registry.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub id: String,
    pub kind: FieldKind,
    pub required: bool,
    pub label: String,
    /// Text the error element starts out with.
    pub error_text: String,
    /// Allowed values for selects and radio groups.
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind,
            required: false,
            error_text: kind.default_error_text().to_string(),
            options: Vec::new(),
        }
    }

    /// Judge a value against this field's rule.
    ///
    /// Empty text is not judged here: whether an empty field is acceptable is
    /// the required check's call. Selection fields are judged on emptiness
    /// when required.
    pub fn check(&self, value: &FieldValue, today: NaiveDate) -> ValidationResult {
        let text = value.as_text();
        match self.kind {
            FieldKind::Name => check_name(text),
            FieldKind::Email => ValidationResult::from_bool(is_valid_email(text)),
            FieldKind::Phone => check_phone(text),
            FieldKind::Zip => ValidationResult::from_bool(is_valid_zip(text)),
            FieldKind::Gpa => ValidationResult::from_bool(is_valid_gpa(text)),
            FieldKind::DateOfBirth => check_date_of_birth(text, today),
            FieldKind::Text | FieldKind::LongText | FieldKind::MultiSelect => {
                ValidationResult::valid()
            }
            FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox => {
                ValidationResult::from_bool(!self.required || !value.is_empty())
            }
        }
    }

    /// Covered by the generic required-field sweep. Radio groups and
    /// checkboxes have their own submission steps.
    pub fn in_required_sweep(&self) -> bool {
        self.required && !matches!(self.kind, FieldKind::Radio | FieldKind::Checkbox)
    }

    fn element(&self) -> Element {
        let element = match self.kind.control() {
            Control::TextArea => Element::text_area(&self.id),
            Control::Select => Element::select(&self.id),
            Control::MultiSelect => Element::multi_select(&self.id),
            Control::RadioGroup => Element::radio_group(&self.id),
            Control::Checkbox => Element::checkbox(&self.id),
            _ => Element::text_input(&self.id),
        };
        element
            .required(self.required)
            .options(self.options.iter().cloned())
    }
}

/// Ordered set of fields making up a form.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start describing a field.
    pub fn field(self, id: impl Into<String>, kind: FieldKind) -> FieldBuilder {
        FieldBuilder {
            registry: self,
            spec: FieldSpec::new(id, kind),
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn of_kind(&self, kind: FieldKind) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the element document for this registry: the form container,
    /// each field followed by its error element, and the hidden success
    /// banner.
    pub fn document(&self) -> Document {
        let mut doc = Document::new().with(Element::container(FORM_ID));
        for spec in &self.fields {
            doc.push(spec.element());
            doc.push(Element::message(error_element_id(&spec.id), &spec.error_text));
        }
        doc.with(
            Element::message(SUCCESS_ID, "Registration submitted successfully!")
                .class(HIDDEN_CLASS),
        )
    }

    /// The student registration form.
    #[rustfmt::skip]
    pub fn student_registration() -> Self {
        Self::new()
            .field("firstName", FieldKind::Name)
                .required()
                .label("First name")
            .field("lastName", FieldKind::Name)
                .required()
                .label("Last name")
            .field("email", FieldKind::Email)
                .required()
                .label("Email")
            .field("phone", FieldKind::Phone)
                .required()
                .label("Phone")
            .field("parentPhone", FieldKind::Phone)
                .label("Parent/guardian phone")
            .field("dateOfBirth", FieldKind::DateOfBirth)
                .required()
                .label("Date of birth")
            .field("gender", FieldKind::Radio)
                .required()
                .label("Gender")
                .options(["male", "female", "other", "prefer-not-to-say"])
                .error_text("Please select a gender")
            .field("grade", FieldKind::Select)
                .required()
                .label("Grade")
                .options(["K", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"])
                .error_text("Please select a grade")
            .field("gpa", FieldKind::Gpa)
                .label("GPA")
            .field("address", FieldKind::Text)
                .required()
                .label("Street address")
            .field("city", FieldKind::Text)
                .required()
                .label("City")
            .field("state", FieldKind::Text)
                .label("State/province")
            .field("zipCode", FieldKind::Zip)
                .required()
                .label("ZIP/postal code")
            .field("country", FieldKind::Select)
                .required()
                .label("Country")
                .options(["US", "CA", "MX", "GB", "other"])
                .error_text("Please select a country")
            .field("activities", FieldKind::MultiSelect)
                .label("Activities")
                .options(["sports", "music", "art", "drama", "debate", "robotics", "volunteering"])
            .field("comments", FieldKind::LongText)
                .label("Comments")
            .field("terms", FieldKind::Checkbox)
                .required()
                .label("Terms and conditions")
                .error_text("You must accept the terms and conditions")
            .build()
    }
}

/// Builder for one registry entry.
pub struct FieldBuilder {
    registry: FieldRegistry,
    spec: FieldSpec,
}

impl FieldBuilder {
    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.spec.label = label.into();
        self
    }

    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.spec.error_text = text.into();
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Continue to the next field.
    pub fn field(self, id: impl Into<String>, kind: FieldKind) -> FieldBuilder {
        self.build().field(id, kind)
    }

    /// Finish the registry. A repeated id replaces the earlier entry.
    pub fn build(self) -> FieldRegistry {
        let mut registry = self.registry;
        match registry.fields.iter_mut().find(|f| f.id == self.spec.id) {
            Some(existing) => *existing = self.spec,
            None => registry.fields.push(self.spec),
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_policy_thresholds() {
        let phone = FieldKind::Phone.edit_policy();
        assert!(!phone.ready("(555) 123-456"));
        assert!(phone.ready("(555) 123-4567"));

        let zip = FieldKind::Zip.edit_policy();
        assert!(!zip.ready("12"));
        assert!(zip.ready("123"));

        assert!(!FieldKind::Email.edit_policy().ready("  "));
        assert!(FieldKind::Email.edit_policy().ready("a"));
    }

    #[test]
    fn test_document_pairs_error_elements() {
        let registry = FieldRegistry::student_registration();
        let doc = registry.document();
        for spec in registry.iter() {
            assert!(doc.contains(&spec.id), "missing {}", spec.id);
            assert!(doc.contains(&error_element_id(&spec.id)));
        }
        assert!(doc.has_class(SUCCESS_ID, HIDDEN_CLASS));
        assert!(!doc.has_class(FORM_ID, HIDDEN_CLASS));
    }

    #[test]
    fn test_required_sweep_skips_choice_groups() {
        let registry = FieldRegistry::student_registration();
        assert!(registry.get("city").unwrap().in_required_sweep());
        assert!(registry.get("grade").unwrap().in_required_sweep());
        assert!(!registry.get("gender").unwrap().in_required_sweep());
        assert!(!registry.get("terms").unwrap().in_required_sweep());
        assert!(!registry.get("gpa").unwrap().in_required_sweep());
    }

    #[test]
    fn test_repeated_id_replaces_entry() {
        let registry = FieldRegistry::new()
            .field("a", FieldKind::Text)
            .field("a", FieldKind::Email)
            .required()
            .build();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().kind, FieldKind::Email);
    }

    #[test]
    fn test_select_check_depends_on_required() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let optional = FieldSpec::new("x", FieldKind::Select);
        assert!(optional.check(&FieldValue::Text(String::new()), today).is_valid());

        let mut required = FieldSpec::new("x", FieldKind::Select);
        required.required = true;
        assert!(!required.check(&FieldValue::Text(String::new()), today).is_valid());
        assert!(required.check(&FieldValue::Text("US".into()), today).is_valid());
    }
}
