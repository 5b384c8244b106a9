use pagebuilder_model::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker class of a section container
pub const MAIN_CLASS: &str = "main";

/// Marker class of an item container
pub const ITEM_CLASS: &str = "item";

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Identity of the section or item this element mirrors
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_id: Option<NodeId>,
    },

    /// Text node
    Text { content: String },
}

/// Which data node a rendered element stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Main,
    Item,
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            node_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = (String, String)>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.extend(attrs);
        }
        self
    }

    /// Append a class name to the `class` attribute
    pub fn with_class(mut self, class: &str) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let classes = attributes.entry("class".to_string()).or_default();
            if !classes.is_empty() {
                classes.push(' ');
            }
            classes.push_str(class);
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles(mut self, new_styles: BTreeMap<String, String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(new_styles);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_node_id(mut self, id: NodeId) -> Self {
        if let VNode::Element {
            ref mut node_id, ..
        } = self
        {
            *node_id = Some(id);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            VNode::Element { attributes, .. } => attributes
                .get("class")
                .map(|classes| classes.split_whitespace().any(|c| c == class))
                .unwrap_or(false),
            VNode::Text { .. } => false,
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        if self.has_class(MAIN_CLASS) {
            Some(Marker::Main)
        } else if self.has_class(ITEM_CLASS) {
            Some(Marker::Item)
        } else {
            None
        }
    }

    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            VNode::Element { node_id, .. } => node_id.as_ref(),
            VNode::Text { .. } => None,
        }
    }

    pub fn attributes(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            VNode::Element { attributes, .. } => Some(attributes),
            VNode::Text { .. } => None,
        }
    }

    pub fn styles(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            VNode::Element { styles, .. } => Some(styles),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }
}

/// Rendered preview (root nodes plus the preview stylesheet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub nodes: Vec<VNode>,
    pub styles: Vec<CssRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub properties: BTreeMap<String, String>,
}

impl VirtualDomDocument {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }

    pub fn add_style(&mut self, selector: impl Into<String>, properties: &[(&str, &str)]) {
        self.styles.push(CssRule {
            selector: selector.into(),
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}

impl Default for VirtualDomDocument {
    fn default() -> Self {
        Self::new()
    }
}
