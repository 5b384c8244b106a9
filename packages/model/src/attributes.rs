//! Element attribute codec: record fields ⇄ `data-*` attributes.

use serde_json::Value;
use std::collections::BTreeMap;

pub const DATA_PREFIX: &str = "data-";

/// Bookkeeping attribute carrying the node id. Never read back as data.
pub const TEMP_ID_KEY: &str = "temp_id";

pub const IMAGES_KEY: &str = "images";

/// Flat key/value view of a rendered node, as read from its `data-*` attributes
pub type ElementData = BTreeMap<String, String>;

/// Attribute value for a JSON field
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(values) => values
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// `data-<key>`, with key bytes outside `[a-z0-9._-]` written as `%XX`
pub fn data_attribute_name(key: &str) -> String {
    let mut name = String::with_capacity(DATA_PREFIX.len() + key.len());
    name.push_str(DATA_PREFIX);
    for byte in key.bytes() {
        if is_plain_key_byte(byte) {
            name.push(byte as char);
        } else {
            name.push_str(&format!("%{:02X}", byte));
        }
    }
    name
}

/// Field key of a `data-*` attribute name. `None` for other attributes or
/// malformed escapes.
pub fn data_key(name: &str) -> Option<String> {
    let encoded = name.strip_prefix(DATA_PREFIX)?.as_bytes();
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut i = 0;
    while i < encoded.len() {
        match encoded[i] {
            b'%' => {
                let hex = encoded.get(i + 1..i + 3)?;
                let hex = std::str::from_utf8(hex).ok()?;
                bytes.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            byte => {
                bytes.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(bytes).ok()
}

fn is_plain_key_byte(byte: u8) -> bool {
    byte.is_ascii_lowercase() || byte.is_ascii_digit() || matches!(byte, b'-' | b'_' | b'.')
}

/// Mirror record fields as `data-<key>` attributes (skipping `images` and `temp_id`)
pub fn encode<'a, I>(fields: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    fields
        .into_iter()
        .filter(|(key, _)| key.as_str() != IMAGES_KEY && key.as_str() != TEMP_ID_KEY)
        .map(|(key, value)| (data_attribute_name(key), display_value(value)))
        .collect()
}

/// Read the element data of a node back from its attributes
pub fn element_data<'a, I>(attributes: I) -> ElementData
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    attributes
        .into_iter()
        .filter_map(|(name, value)| {
            let key = data_key(name)?;
            (key != TEMP_ID_KEY).then(|| (key, value.clone()))
        })
        .collect()
}

/// True when every expected pair equals the node's `data-<key>` value
pub fn matches_data(attributes: &BTreeMap<String, String>, expected: &ElementData) -> bool {
    expected.iter().all(|(key, value)| {
        attributes
            .get(&data_attribute_name(key))
            .map(|actual| actual == value)
            .unwrap_or(false)
    })
}
