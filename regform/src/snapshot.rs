//! Point-in-time capture of the form's values.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dom::{Control, Document, FieldValue};
use crate::field::FieldRegistry;

/// Captured value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    Single(String),
    Many(Vec<String>),
}

impl SnapshotValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Many(_) => None,
        }
    }
}

impl From<SnapshotValue> for FieldValue {
    fn from(value: SnapshotValue) -> Self {
        match value {
            SnapshotValue::Single(text) => FieldValue::Text(text),
            SnapshotValue::Many(values) => FieldValue::Many(values),
        }
    }
}

/// Field values keyed by field id, in form order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<(String, SnapshotValue)>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the registry's fields from the document.
    ///
    /// Follows form-data rules: text-like fields are always present, an
    /// unchecked checkbox and an unselected radio group are left out, a
    /// checked checkbox records `"on"`, and a multi-select records its
    /// selection as a list. Fields without an element are skipped.
    pub fn capture(registry: &FieldRegistry, doc: &Document) -> Self {
        let mut snapshot = Self::new();
        for spec in registry.iter() {
            let Some(element) = doc.get(&spec.id) else {
                continue;
            };
            let value = match (&element.value, element.control) {
                (FieldValue::Checked(true), _) => SnapshotValue::Single("on".to_string()),
                (FieldValue::Checked(false), _) => continue,
                (FieldValue::Many(values), _) => SnapshotValue::Many(values.clone()),
                (FieldValue::Text(text), Control::RadioGroup) if text.is_empty() => continue,
                (FieldValue::Text(text), _) => SnapshotValue::Single(text.clone()),
            };
            snapshot.insert(spec.id.clone(), value);
        }
        snapshot
    }

    /// Set a value, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: SnapshotValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON, for logging and printing.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = FormSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field ids to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut snapshot = FormSnapshot::new();
                while let Some((key, value)) = access.next_entry::<String, SnapshotValue>()? {
                    snapshot.insert(key, value);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keeps_field_order() {
        let mut snapshot = FormSnapshot::new();
        snapshot.insert("zeta", SnapshotValue::Single("1".into()));
        snapshot.insert("alpha", SnapshotValue::Many(vec!["a".into(), "b".into()]));

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":["a","b"]}"#);

        let parsed: FormSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut snapshot = FormSnapshot::new();
        snapshot.insert("a", SnapshotValue::Single("1".into()));
        snapshot.insert("b", SnapshotValue::Single("2".into()));
        snapshot.insert("a", SnapshotValue::Single("3".into()));
        let keys: Vec<_> = snapshot.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(snapshot.get("a").and_then(SnapshotValue::as_str), Some("3"));
    }

    #[test]
    fn test_rejects_non_map_json() {
        assert!(serde_json::from_str::<FormSnapshot>("[1, 2]").is_err());
    }
}
