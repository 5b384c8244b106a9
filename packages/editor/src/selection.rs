//! # Selection Controller
//!
//! Selection is held as node ids rather than positions:
//!
//! ```text
//! Idle ──select──> Section ──select──> Item
//!  ^                 ^                  │
//!  │                 └─navigate_to_parent
//!  └──────────── clear / cancel ────────┘
//! ```
//!
//! Positions are derived on demand from the current document, so a
//! re-render between selecting and editing cannot shift the target.

use pagebuilder_evaluator::{find_main_matching, locate, Marker, VNode, VirtualDomDocument};
use pagebuilder_model::{Document, ElementData, NodeId, NodePath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    Idle,
    Section {
        section: NodeId,
    },
    Item {
        section: NodeId,
        item: NodeId,
    },
}

impl Selection {
    /// Selection of the section or item with `id`, if it is in `document`
    pub fn resolve(document: &Document, id: &NodeId) -> Option<Self> {
        Self::at_path(document, document.path_of(id)?)
    }

    /// Selection of the node at a position in `document`
    pub fn at_path(document: &Document, path: NodePath) -> Option<Self> {
        let section = document.home_page.get(path.section_index)?;
        match path.item_index {
            None => Some(Selection::Section {
                section: section.id.clone(),
            }),
            Some(item_index) => Some(Selection::Item {
                section: section.id.clone(),
                item: section.items().get(item_index)?.id.clone(),
            }),
        }
    }

    /// Classify a rendered node by its marker class.
    ///
    /// `None` node clears the selection. Returns `None` when the node is not
    /// part of `vdom` or is not a `main`/`item` container; callers treat
    /// that as a no-op.
    pub fn from_node(
        document: &Document,
        vdom: &VirtualDomDocument,
        node: Option<&VNode>,
    ) -> Option<Self> {
        let Some(node) = node else {
            return Some(Selection::Idle);
        };
        node.marker()?;
        let path = locate(vdom, node)?;
        Self::at_path(document, path)
    }

    /// Recover a section selection from element data, e.g. after a reload.
    ///
    /// Every pair must match the section's mirrored attributes. No match
    /// yields `Idle`.
    pub fn from_data(document: &Document, vdom: &VirtualDomDocument, data: &ElementData) -> Self {
        find_main_matching(vdom, data)
            .filter(|node| node.marker() == Some(Marker::Main))
            .and_then(VNode::node_id)
            .and_then(|id| Self::resolve(document, id))
            .unwrap_or_default()
    }

    /// From an item to its owning section; any other state is unchanged
    pub fn navigate_to_parent(&self) -> Self {
        match self {
            Selection::Item { section, .. } => Selection::Section {
                section: section.clone(),
            },
            other => other.clone(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// The selected node itself
    pub fn target(&self) -> Option<&NodeId> {
        match self {
            Selection::Idle => None,
            Selection::Section { section } => Some(section),
            Selection::Item { item, .. } => Some(item),
        }
    }

    /// Current position of the target in `document`
    pub fn path(&self, document: &Document) -> Option<NodePath> {
        document.path_of(self.target()?)
    }

    /// Re-derive the selection after the document changed underneath it.
    ///
    /// A target that no longer exists yields `Idle`; an item that moved to
    /// another section follows its new owner.
    pub fn revalidate(&self, document: &Document) -> Self {
        match self.target() {
            Some(id) => Self::resolve(document, id).unwrap_or_default(),
            None => Selection::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_evaluator::{item_nodes, main_nodes, project, ProjectOptions};
    use pagebuilder_model::IdGenerator;

    fn sample() -> Document {
        let mut doc = Document::from_json(
            r#"{"home_page":[
                {"type":"topbar","text":"Hi"},
                {"type":"heading","text":"New"},
                {"type":"carousel","images":[{"src":"a.png"},{"src":"b.png"}]}
            ]}"#,
        )
        .unwrap();
        doc.assign_ids(&mut IdGenerator::new("selection"));
        doc
    }

    #[test]
    fn test_select_item_node_then_parent() {
        let doc = sample();
        let vdom = project(&doc, &ProjectOptions::default());
        let item = item_nodes(main_nodes(&vdom)[2])[1];

        let selection = Selection::from_node(&doc, &vdom, Some(item)).unwrap();
        assert_eq!(
            selection.path(&doc),
            Some(NodePath {
                section_index: 2,
                item_index: Some(1)
            })
        );

        let parent = selection.navigate_to_parent();
        assert_eq!(
            parent.path(&doc),
            Some(NodePath {
                section_index: 2,
                item_index: None
            })
        );
        assert_eq!(parent.navigate_to_parent(), parent);
    }

    #[test]
    fn test_null_node_clears() {
        let doc = sample();
        let vdom = project(&doc, &ProjectOptions::default());
        assert_eq!(
            Selection::from_node(&doc, &vdom, None),
            Some(Selection::Idle)
        );
    }

    #[test]
    fn test_detached_or_unmarked_node_is_a_miss() {
        let doc = sample();
        let old = project(&doc, &ProjectOptions::default());
        let fresh = project(&doc, &ProjectOptions::default());

        let stale = main_nodes(&old)[0];
        assert_eq!(Selection::from_node(&doc, &fresh, Some(stale)), None);

        let content = &main_nodes(&fresh)[0].children()[0];
        assert_eq!(Selection::from_node(&doc, &fresh, Some(content)), None);
    }

    #[test]
    fn test_from_data_matches_sections() {
        let doc = sample();
        let vdom = project(&doc, &ProjectOptions::default());

        let mut data = ElementData::new();
        data.insert("type".to_string(), "heading".to_string());
        assert_eq!(
            Selection::from_data(&doc, &vdom, &data),
            Selection::Section {
                section: doc.home_page[1].id.clone()
            }
        );

        data.insert("text".to_string(), "Old".to_string());
        assert!(Selection::from_data(&doc, &vdom, &data).is_idle());
    }

    #[test]
    fn test_revalidate_drops_missing_target() {
        let mut doc = sample();
        let selection = Selection::resolve(&doc, &doc.home_page[0].id.clone()).unwrap();

        doc.home_page.remove(0);
        assert!(selection.revalidate(&doc).is_idle());
    }

    #[test]
    fn test_serializes_with_state_tag() {
        let selection = Selection::Item {
            section: "s-1".into(),
            item: "s-2".into(),
        };
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "item", "section": "s-1", "item": "s-2"})
        );
        assert_eq!(
            serde_json::to_value(Selection::Idle).unwrap(),
            serde_json::json!({"state": "idle"})
        );
    }
}
