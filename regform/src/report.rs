//! Error display for a single field.
//!
//! A field `X` pairs with an error element `XError`. Flagging a field adds
//! [`ERROR_CLASS`] to the field and [`SHOW_CLASS`] to the error element;
//! clearing removes both.

use crate::dom::Document;

/// Class marking a field element as invalid.
pub const ERROR_CLASS: &str = "error";
/// Class making an error element visible.
pub const SHOW_CLASS: &str = "show";

/// Id of the element displaying `field_id`'s error.
pub fn error_element_id(field_id: &str) -> String {
    format!("{field_id}Error")
}

/// Apply a verdict to the field and its error element and hand `valid` back.
///
/// On invalid, both elements are marked and the error text is replaced when
/// `message` is given; otherwise the existing text stays. On valid, both
/// marks are removed. If either element is missing nothing changes and the
/// field counts as valid.
pub fn report(doc: &mut Document, field_id: &str, valid: bool, message: Option<&str>) -> bool {
    let error_id = error_element_id(field_id);
    if !doc.contains(field_id) || !doc.contains(&error_id) {
        log::debug!("[report] {} or {} not found, skipping", field_id, error_id);
        return true;
    }

    if valid {
        doc.remove_class(field_id, ERROR_CLASS);
        doc.remove_class(&error_id, SHOW_CLASS);
        return true;
    }

    doc.add_class(field_id, ERROR_CLASS);
    doc.add_class(&error_id, SHOW_CLASS);
    if let Some(msg) = message {
        doc.set_text(&error_id, msg);
    }
    false
}

/// Clear every field's error state.
pub fn clear_all(doc: &mut Document) {
    for element in doc.iter_mut() {
        element.classes.remove(ERROR_CLASS);
        element.classes.remove(SHOW_CLASS);
    }
}

/// Whether the field is currently shown as invalid.
pub fn is_flagged(doc: &Document, field_id: &str) -> bool {
    doc.has_class(field_id, ERROR_CLASS)
}
