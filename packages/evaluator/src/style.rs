//! Inline style derivation and selection highlighting.

use crate::query::{find_by_node_id_mut, visit_marked_mut};
use crate::vdom::{VNode, VirtualDomDocument};
use pagebuilder_model::attributes::display_value;
use pagebuilder_model::{Fields, NodeId};
use serde_json::Value;
use std::collections::BTreeMap;

pub const HIGHLIGHT_BORDER: &str = "2px solid #3b82f6";
pub const HIGHLIGHT_RADIUS: &str = "5px";

/// Section keys that are content, not style
const NON_STYLE_KEYS: &[&str] = &["type", "text", "onClick", "id", "images"];

/// Properties that take bare numbers
const UNITLESS: &[&str] = &[
    "flex",
    "flex-grow",
    "flex-shrink",
    "font-weight",
    "line-height",
    "opacity",
    "order",
    "z-index",
];

/// Inline style of a heading section, derived from its remaining fields
pub fn heading_style(fields: &Fields) -> BTreeMap<String, String> {
    let mut styles = BTreeMap::new();

    for (key, value) in fields {
        if NON_STYLE_KEYS.contains(&key.as_str()) {
            continue;
        }

        let property = to_kebab_case(key);
        if !is_property_name(&property) {
            continue;
        }
        match value {
            Value::Array(colors) if property == "background-color" => {
                let stops: Vec<String> = colors.iter().map(display_value).collect();
                styles.insert(
                    "background".to_string(),
                    format!("linear-gradient({})", stops.join(", ")),
                );
            }
            Value::Array(values) => {
                let parts: Vec<String> = values.iter().map(display_value).collect();
                styles.insert(property, parts.join(", "));
            }
            Value::Number(n) if !UNITLESS.contains(&property.as_str()) => {
                styles.insert(property, format!("{}px", n));
            }
            Value::Null | Value::Object(_) => {}
            other => {
                styles.insert(property, display_value(other));
            }
        }
    }

    styles
}

fn is_property_name(property: &str) -> bool {
    !property.is_empty()
        && property
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// `fontSize` → `font-size`; already kebab-cased keys pass through
pub fn to_kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Remove border styling from every `main` and `item` node
pub fn clear_highlights(vdom: &mut VirtualDomDocument) {
    visit_marked_mut(&mut vdom.nodes, &mut |node| {
        if let VNode::Element { styles, .. } = node {
            styles.remove("border");
            styles.remove("border-radius");
        }
    });
}

/// Clear all highlights, then border exactly the node rendered for `id`.
///
/// Returns false when no rendered node carries that id.
pub fn highlight(vdom: &mut VirtualDomDocument, id: &NodeId) -> bool {
    clear_highlights(vdom);

    match find_by_node_id_mut(&mut vdom.nodes, id) {
        Some(VNode::Element { styles, .. }) => {
            styles.insert("border".to_string(), HIGHLIGHT_BORDER.to_string());
            styles.insert("border-radius".to_string(), HIGHLIGHT_RADIUS.to_string());
            true
        }
        _ => false,
    }
}
