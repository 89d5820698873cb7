use serde::{Deserialize, Serialize};

/// One ordered key/value row as edited in a table (headers, params, form
/// fields, mock status). `index` is a display-order hint, not a uniqueness
/// key: duplicate keys are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KVField {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl KVField {
    pub fn new(index: u32, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            index,
            key: key.into(),
            value: value.into(),
            description: None,
            selected: None,
        }
    }
}

/// Upsert-by-key with case-insensitive key match. If a row with the same key
/// exists it is replaced in place, otherwise the row is appended; indices are
/// rewritten to match the resulting positions.
pub fn replace(fields: &mut Vec<KVField>, target: KVField) {
    match fields
        .iter()
        .position(|f| f.key.eq_ignore_ascii_case(&target.key))
    {
        Some(pos) => fields[pos] = target,
        None => fields.push(target),
    }
    for (idx, field) in fields.iter_mut().enumerate() {
        field.index = idx as u32;
    }
}

/// Flatten rows into a key→value map view: case-sensitive last-write-wins on
/// duplicate keys, first-seen position preserved.
pub fn flatten(fields: &[KVField]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(fields.len());
    for field in fields {
        match pairs.iter_mut().find(|(key, _)| *key == field.key) {
            Some((_, value)) => *value = field.value.clone(),
            None => pairs.push((field.key.clone(), field.value.clone())),
        }
    }
    pairs
}

/// Case-insensitive lookup skipping rows with an empty value.
pub fn get<'a>(fields: &'a [KVField], key: &str) -> Option<&'a KVField> {
    fields
        .iter()
        .find(|f| f.key.eq_ignore_ascii_case(key) && !f.value.is_empty())
}
