//! Minimal element document the form reads values from and writes error
//! state to.
//!
//! Elements are addressed by id and kept in document order. Only what the
//! form needs is modelled: the control kind, its value, a class list, the
//! text content of message elements, and the scroll/focus target.

use std::collections::{BTreeSet, HashMap};

/// Kind of control an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TextInput,
    TextArea,
    Select,
    MultiSelect,
    Checkbox,
    /// A named group of radio buttons, addressed as one element.
    RadioGroup,
    /// Static text (error messages, success banner).
    Message,
    Container,
}

/// Current value of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs, textareas, single selects and radio groups. Empty means
    /// nothing typed or nothing selected.
    Text(String),
    Checked(bool),
    Many(Vec<String>),
}

impl FieldValue {
    /// Empty text, unchecked box or no selected options.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Checked(checked) => !checked,
            Self::Many(values) => values.is_empty(),
        }
    }

    /// Text content, or `""` for non-text values.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            _ => "",
        }
    }

    /// Empty value of the same shape.
    pub fn cleared(&self) -> Self {
        match self {
            Self::Text(_) => Self::Text(String::new()),
            Self::Checked(_) => Self::Checked(false),
            Self::Many(_) => Self::Many(Vec::new()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub control: Control,

    // State
    pub value: FieldValue,
    /// Allowed values for selects and radio groups. Empty accepts anything.
    pub options: Vec<String>,
    pub required: bool,

    // Presentation
    pub classes: BTreeSet<String>,
    pub text: String,
}

impl Element {
    fn new(id: impl Into<String>, control: Control, value: FieldValue) -> Self {
        Self {
            id: id.into(),
            control,
            value,
            options: Vec::new(),
            required: false,
            classes: BTreeSet::new(),
            text: String::new(),
        }
    }

    pub fn text_input(id: impl Into<String>) -> Self {
        Self::new(id, Control::TextInput, FieldValue::default())
    }

    pub fn text_area(id: impl Into<String>) -> Self {
        Self::new(id, Control::TextArea, FieldValue::default())
    }

    pub fn select(id: impl Into<String>) -> Self {
        Self::new(id, Control::Select, FieldValue::default())
    }

    pub fn multi_select(id: impl Into<String>) -> Self {
        Self::new(id, Control::MultiSelect, FieldValue::Many(Vec::new()))
    }

    pub fn checkbox(id: impl Into<String>) -> Self {
        Self::new(id, Control::Checkbox, FieldValue::Checked(false))
    }

    pub fn radio_group(id: impl Into<String>) -> Self {
        Self::new(id, Control::RadioGroup, FieldValue::default())
    }

    pub fn message(id: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(id, Control::Message, FieldValue::default());
        element.text = text.into();
        element
    }

    pub fn container(id: impl Into<String>) -> Self {
        Self::new(id, Control::Container, FieldValue::default())
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Whether this element holds user input.
    pub fn is_control(&self) -> bool {
        !matches!(self.control, Control::Message | Control::Container)
    }

    /// Assign a value the way a browser would: select values outside the
    /// option list fall back to "nothing selected", and the value is coerced
    /// to the control's shape.
    pub fn assign(&mut self, value: FieldValue) {
        self.value = match (self.control, value) {
            (Control::Checkbox, FieldValue::Checked(checked)) => FieldValue::Checked(checked),
            (Control::Checkbox, FieldValue::Text(text)) => {
                FieldValue::Checked(matches!(text.as_str(), "on" | "true"))
            }
            (Control::MultiSelect, FieldValue::Many(values)) => {
                FieldValue::Many(values.into_iter().filter(|v| self.allows(v)).collect())
            }
            (Control::MultiSelect, FieldValue::Text(text)) if self.allows(&text) => {
                FieldValue::Many(vec![text])
            }
            (Control::Select | Control::RadioGroup, FieldValue::Text(text)) => {
                if self.allows(&text) {
                    FieldValue::Text(text)
                } else {
                    FieldValue::Text(String::new())
                }
            }
            (Control::TextInput | Control::TextArea, FieldValue::Text(text)) => {
                FieldValue::Text(text)
            }
            (_, _) => self.value.cleared(),
        };
    }

    fn allows(&self, value: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| o == value)
    }
}

/// Elements in document order, addressable by id.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    index: HashMap<String, usize>,
    focused: Option<String>,
    scrolled_to: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. An element with an existing id replaces it in place.
    pub fn push(&mut self, element: Element) {
        match self.index.get(&element.id) {
            Some(&pos) => self.elements[pos] = element,
            None => {
                self.index.insert(element.id.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
    }

    pub fn with(mut self, element: Element) -> Self {
        self.push(element);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.index.get(id).map(|&pos| &self.elements[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.index.get(id).map(|&pos| &mut self.elements[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.get(id).map(|e| &e.value)
    }

    /// Text value of a field, `""` when it is missing or not textual.
    pub fn text_value(&self, id: &str) -> &str {
        self.value(id).map(FieldValue::as_text).unwrap_or("")
    }

    /// Returns false when the element does not exist.
    pub fn set_value(&mut self, id: &str, value: FieldValue) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.assign(value);
                true
            }
            None => false,
        }
    }

    /// Returns false when the element does not exist.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Returns false when the element does not exist.
    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    /// Returns false when the element does not exist.
    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.classes.remove(class);
                true
            }
            None => false,
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    /// First element in document order carrying `class`.
    pub fn first_with_class(&self, class: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.has_class(class))
    }

    /// Scroll an element into view and focus it. Unknown ids are ignored.
    pub fn scroll_into_view(&mut self, id: &str) {
        if !self.contains(id) {
            log::debug!("[dom] scroll target {} not found", id);
            return;
        }
        self.scrolled_to = Some(id.to_string());
        self.focused = Some(id.to_string());
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_rejects_unknown_option() {
        let mut doc = Document::new().with(Element::select("grade").options(["9", "10"]));
        assert!(doc.set_value("grade", FieldValue::Text("10".into())));
        assert_eq!(doc.text_value("grade"), "10");

        doc.set_value("grade", FieldValue::Text("13".into()));
        assert_eq!(doc.text_value("grade"), "");
    }

    #[test]
    fn test_checkbox_accepts_form_data_text() {
        let mut doc = Document::new().with(Element::checkbox("terms"));
        doc.set_value("terms", FieldValue::Text("on".into()));
        assert_eq!(doc.value("terms"), Some(&FieldValue::Checked(true)));
    }

    #[test]
    fn test_multi_select_filters_options() {
        let mut doc =
            Document::new().with(Element::multi_select("activities").options(["band", "chess"]));
        doc.set_value(
            "activities",
            FieldValue::Many(vec!["band".into(), "polo".into()]),
        );
        assert_eq!(
            doc.value("activities"),
            Some(&FieldValue::Many(vec!["band".into()]))
        );
    }

    #[test]
    fn test_missing_element_is_tolerated() {
        let mut doc = Document::new();
        assert!(!doc.add_class("nope", "error"));
        assert!(!doc.set_text("nope", "x"));
        doc.scroll_into_view("nope");
        assert_eq!(doc.scrolled_to(), None);
        assert_eq!(doc.text_value("nope"), "");
    }

    #[test]
    fn test_first_with_class_uses_document_order() {
        let mut doc = Document::new()
            .with(Element::text_input("a"))
            .with(Element::text_input("b"))
            .with(Element::text_input("c"));
        doc.add_class("c", "error");
        doc.add_class("b", "error");
        assert_eq!(doc.first_with_class("error").map(|e| e.id.as_str()), Some("b"));
    }

    #[test]
    fn test_push_replaces_existing_id() {
        let doc = Document::new()
            .with(Element::text_input("a"))
            .with(Element::text_area("a"));
        assert_eq!(doc.iter().count(), 1);
        assert_eq!(doc.get("a").map(|e| e.control), Some(Control::TextArea));
    }
}
