//! Edit form backing the side panel: the selected node's fields, edited as
//! text and coerced back to JSON on the way in.

use crate::selection::Selection;
use pagebuilder_model::{attributes::display_value, Document, Fields};
use serde::Serialize;
use serde_json::{Number, Value};

/// Key rendered as a location picker instead of a text field
pub const LOCATION_TYPE_KEY: &str = "location_type";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EditForm {
    fields: Fields,
}

/// One control of the rendered form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormControl {
    pub key: String,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl EditForm {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    /// Fields of the selected node (`images` excluded); empty when idle
    pub fn for_selection(document: &Document, selection: &Selection) -> Self {
        let fields = match selection {
            Selection::Idle => None,
            Selection::Section { section } => document.section(section).map(|s| s.form_fields()),
            Selection::Item { item, .. } => document.item(item).map(|i| i.form_fields()),
        };
        Self::new(fields.unwrap_or_default())
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Store text typed into the control for `key`
    pub fn set_text(&mut self, key: &str, text: &str) {
        let value = coerce(self.fields.get(key), text);
        self.fields.insert(key.to_string(), value);
    }

    pub fn describe(&self, location_list: &[String]) -> Vec<FormControl> {
        self.fields
            .iter()
            .map(|(key, value)| {
                let options = (key == LOCATION_TYPE_KEY).then(|| {
                    location_list
                        .iter()
                        .map(|location| SelectOption {
                            label: location.to_uppercase(),
                            value: location.clone(),
                        })
                        .collect()
                });
                let placeholder = if options.is_some() {
                    "Select location type".to_string()
                } else {
                    format!("Enter {}", key)
                };
                FormControl {
                    key: key.clone(),
                    label: label_for(key),
                    value: display_value(value),
                    placeholder,
                    options,
                }
            })
            .collect()
    }
}

/// `background-color` → `BACKGROUND COLOR`
pub fn label_for(key: &str) -> String {
    key.replace(['_', ',', '-'], " ").to_uppercase()
}

/// Interpret form text by the type of the value it replaces.
///
/// Numbers stay numbers while the text parses, arrays split on `,`,
/// booleans accept `true`/`false`; anything else becomes a string.
pub fn coerce(previous: Option<&Value>, text: &str) -> Value {
    match previous {
        Some(Value::Number(_)) => parse_number(text.trim())
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(text.to_string())),
        Some(Value::Array(_)) => Value::Array(
            text.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        ),
        Some(Value::Bool(_)) => match text.trim() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(text.to_string()),
        },
        _ => Value::String(text.to_string()),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}
