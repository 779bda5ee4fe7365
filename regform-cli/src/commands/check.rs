use std::process::ExitCode;

use clap::Args;
use regform::dom::Control;
use regform::{FieldRegistry, FieldValue, FormConfig, Store};

use super::build_form;
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Field id, e.g. `email` or `zipCode`.
    pub field: String,
    /// Value as it would be typed. Multi-selects take a comma-separated list,
    /// checkboxes `on`/`off`.
    pub value: String,
    /// Judge dates as if today were this day (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<String>,
}

pub fn list_fields() {
    for spec in FieldRegistry::student_registration().iter() {
        let required = if spec.required { "required" } else { "optional" };
        println!("{:<12} {:<12} {:<9} {}", spec.id, format!("{:?}", spec.kind), required, spec.label);
    }
}

/// Value a selection control receives for `raw`; `None` for typed fields.
fn field_value(control: Control, raw: &str) -> Option<FieldValue> {
    match control {
        Control::TextInput | Control::TextArea => None,
        Control::Checkbox => Some(FieldValue::Checked(matches!(raw, "on" | "true" | "yes"))),
        Control::MultiSelect => Some(FieldValue::Many(
            raw.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect(),
        )),
        _ => Some(FieldValue::Text(raw.to_string())),
    }
}

pub fn run(args: CheckArgs) -> Result<ExitCode, CliError> {
    let config = FormConfig::new().without_autosave();
    let mut form = build_form(Store::in_memory(), config, args.today.as_deref())?;
    let Some(spec) = form.registry().get(&args.field) else {
        return Err(CliError::UnknownField(args.field));
    };

    match field_value(spec.kind.control(), &args.value) {
        Some(value) => form.on_change(&args.field, value),
        None => form.on_input(&args.field, &args.value),
    };

    let shown = form.document().text_value(&args.field).to_string();
    if form.on_blur(&args.field) {
        println!("valid: {:?}", shown);
        Ok(ExitCode::SUCCESS)
    } else {
        let message = form
            .document()
            .get(&format!("{}Error", args.field))
            .map(|e| e.text.clone())
            .unwrap_or_default();
        println!("invalid: {:?} ({})", shown, message);
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_controls_take_input() {
        assert_eq!(field_value(Control::TextInput, "abc"), None);
        assert_eq!(field_value(Control::TextArea, "abc"), None);
    }

    #[test]
    fn test_checkbox_values() {
        assert_eq!(field_value(Control::Checkbox, "on"), Some(FieldValue::Checked(true)));
        assert_eq!(field_value(Control::Checkbox, "off"), Some(FieldValue::Checked(false)));
    }

    #[test]
    fn test_multi_select_splits_on_commas() {
        assert_eq!(
            field_value(Control::MultiSelect, "sports, music,,"),
            Some(FieldValue::Many(vec!["sports".into(), "music".into()]))
        );
    }

    #[test]
    fn test_select_passes_text_through() {
        assert_eq!(
            field_value(Control::Select, "CA"),
            Some(FieldValue::Text("CA".into()))
        );
    }
}
