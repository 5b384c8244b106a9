//! # Structural Edit Operations
//!
//! Edits the user can trigger from the side panel. Each operation takes the
//! current [`Selection`], applies itself to the document and returns the
//! selection that should follow, in one step.
//!
//! Operations check everything they need before touching the document, so
//! an `Err` always means nothing changed.

use crate::errors::MutationError;
use crate::selection::Selection;
use pagebuilder_model::{Document, ElementData, Fields, IdGenerator, NodeId};
use serde::{Deserialize, Serialize};

/// Every transition the edit session understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditAction {
    /// Select a node by id; no id clears the selection
    Select {
        #[serde(default)]
        id: Option<NodeId>,
    },

    /// Select the first section whose mirrored attributes contain `data`
    SelectMatching { data: ElementData },

    NavigateToParent,

    Cancel,

    Duplicate,

    Remove,

    /// Overlay fields onto the selected node; without `fields` the edit
    /// form's current values are used
    Modify {
        #[serde(default)]
        fields: Option<Fields>,
    },

    /// Update one edit form value from text input
    SetField { key: String, value: String },
}

impl EditAction {
    /// Whether the action edits the document (as opposed to the selection
    /// or the form)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EditAction::Duplicate | EditAction::Remove | EditAction::Modify { .. }
        )
    }
}

/// Insert a copy right after the selected node and select the copy.
///
/// Items are copied within their section; sections are copied deeply with
/// fresh ids for the section and all of its items.
pub fn duplicate(
    document: &mut Document,
    selection: &Selection,
    ids: &mut IdGenerator,
) -> Result<Selection, MutationError> {
    match selection {
        Selection::Idle => Err(MutationError::NothingSelected),
        Selection::Section { section } => {
            let index = document
                .section_index(section)
                .ok_or_else(|| MutationError::NodeNotFound(section.clone()))?;
            let copy = document.home_page[index].duplicate(ids);
            let next = Selection::Section {
                section: copy.id.clone(),
            };
            document.home_page.insert(index + 1, copy);
            Ok(next)
        }
        Selection::Item { item, .. } => {
            let (section_index, item_index) = document
                .locate_item(item)
                .ok_or_else(|| MutationError::NodeNotFound(item.clone()))?;
            let section = &mut document.home_page[section_index];
            let items = section
                .images
                .as_mut()
                .ok_or_else(|| MutationError::NodeNotFound(item.clone()))?;
            let copy = items[item_index].duplicate(ids);
            let next = Selection::Item {
                section: section.id.clone(),
                item: copy.id.clone(),
            };
            items.insert(item_index + 1, copy);
            Ok(next)
        }
    }
}

/// Delete the selected node. A section left without items is deleted too.
pub fn remove(document: &mut Document, selection: &Selection) -> Result<Selection, MutationError> {
    match selection {
        Selection::Idle => Err(MutationError::NothingSelected),
        Selection::Section { section } => {
            let index = document
                .section_index(section)
                .ok_or_else(|| MutationError::NodeNotFound(section.clone()))?;
            document.home_page.remove(index);
            Ok(Selection::Idle)
        }
        Selection::Item { item, .. } => {
            let (section_index, item_index) = document
                .locate_item(item)
                .ok_or_else(|| MutationError::NodeNotFound(item.clone()))?;
            let emptied = match document.home_page[section_index].images.as_mut() {
                Some(items) => {
                    items.remove(item_index);
                    items.is_empty()
                }
                None => return Err(MutationError::NodeNotFound(item.clone())),
            };
            if emptied {
                document.home_page.remove(section_index);
            }
            Ok(Selection::Idle)
        }
    }
}

/// Shallow-merge `fields` into the selected node. The selection is kept.
pub fn modify(
    document: &mut Document,
    selection: &Selection,
    fields: &Fields,
) -> Result<Selection, MutationError> {
    match selection {
        Selection::Idle => Err(MutationError::NothingSelected),
        Selection::Section { section } => {
            document
                .section_mut(section)
                .ok_or_else(|| MutationError::NodeNotFound(section.clone()))?
                .merge(fields);
            Ok(selection.clone())
        }
        Selection::Item { item, .. } => {
            let (section_index, item_index) = document
                .locate_item(item)
                .ok_or_else(|| MutationError::NodeNotFound(item.clone()))?;
            if let Some(items) = document.home_page[section_index].images.as_mut() {
                items[item_index].merge(fields);
            }
            Ok(selection.revalidate(document))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(json: &str) -> (Document, IdGenerator) {
        let mut ids = IdGenerator::new("mutations");
        let mut doc = Document::from_json(json).unwrap();
        doc.assign_ids(&mut ids);
        (doc, ids)
    }

    fn item_selection(doc: &Document, section: usize, item: usize) -> Selection {
        Selection::Item {
            section: doc.home_page[section].id.clone(),
            item: doc.home_page[section].items()[item].id.clone(),
        }
    }

    #[test]
    fn test_duplicate_section_inserts_deep_copy_after_original() {
        let (mut doc, mut ids) = load(
            r#"{"home_page":[{"type":"topbar"},{"type":"carousel","images":[{"src":"a.png"}]},{"type":"heading"}]}"#,
        );
        let selection = Selection::Section {
            section: doc.home_page[1].id.clone(),
        };

        let next = duplicate(&mut doc, &selection, &mut ids).unwrap();

        assert_eq!(doc.home_page.len(), 4);
        assert_eq!(doc.home_page[2], doc.home_page[1]);
        assert_ne!(doc.home_page[2].id, doc.home_page[1].id);
        assert_ne!(doc.home_page[2].items()[0].id, doc.home_page[1].items()[0].id);
        assert_eq!(next.target(), Some(&doc.home_page[2].id));
    }

    #[test]
    fn test_duplicate_item_selects_copy() {
        let (mut doc, mut ids) =
            load(r#"{"home_page":[{"type":"banner","images":[{"src":"a.png"},{"src":"b.png"}]}]}"#);
        let selection = item_selection(&doc, 0, 0);

        let next = duplicate(&mut doc, &selection, &mut ids).unwrap();

        let srcs: Vec<_> = doc.home_page[0].items().iter().map(|i| i.src()).collect();
        assert_eq!(srcs, vec![Some("a.png"), Some("a.png"), Some("b.png")]);
        assert_eq!(next, item_selection(&doc, 0, 1));
    }

    #[test]
    fn test_remove_last_item_removes_section() {
        let (mut doc, _) = load(
            r#"{"home_page":[{"type":"topbar"},{"type":"banner","images":[{"src":"a.png"}]}]}"#,
        );
        let selection = item_selection(&doc, 1, 0);

        assert_eq!(remove(&mut doc, &selection), Ok(Selection::Idle));
        assert_eq!(doc.home_page.len(), 1);
        assert_eq!(doc.home_page[0].section_type.as_str(), "topbar");
    }

    #[test]
    fn test_remove_section() {
        let (mut doc, _) = load(r#"{"home_page":[{"type":"topbar"},{"type":"heading"}]}"#);
        let selection = Selection::Section {
            section: doc.home_page[0].id.clone(),
        };

        assert_eq!(remove(&mut doc, &selection), Ok(Selection::Idle));
        assert_eq!(doc.home_page.len(), 1);
        assert_eq!(doc.home_page[0].section_type.as_str(), "heading");
    }

    #[test]
    fn test_modify_merges_shallowly() {
        let (mut doc, _) =
            load(r#"{"home_page":[{"type":"banner","images":[{"a":1,"b":2}]}]}"#);
        let selection = item_selection(&doc, 0, 0);
        let overlay = json!({"b": 9}).as_object().cloned().unwrap();

        let next = modify(&mut doc, &selection, &overlay).unwrap();

        assert_eq!(next, selection);
        assert_eq!(
            serde_json::to_value(&doc.home_page[0].items()[0]).unwrap(),
            json!({"a": 1, "b": 9})
        );
    }

    #[test]
    fn test_modify_section_can_retag() {
        let (mut doc, _) = load(r#"{"home_page":[{"type":"topbar","text":"Hi"}]}"#);
        let selection = Selection::Section {
            section: doc.home_page[0].id.clone(),
        };
        let overlay = json!({"type": "heading", "font-size": 20})
            .as_object()
            .cloned()
            .unwrap();

        modify(&mut doc, &selection, &overlay).unwrap();

        assert_eq!(doc.home_page[0].section_type.as_str(), "heading");
        assert_eq!(doc.home_page[0].text(), Some("Hi"));
        assert_eq!(doc.home_page[0].field("font-size"), Some(&json!(20)));
    }

    #[test]
    fn test_operations_on_idle_or_stale_selection_fail_without_change() {
        let (mut doc, mut ids) = load(r#"{"home_page":[{"type":"topbar"}]}"#);
        let before = doc.clone();
        let stale = Selection::Section {
            section: "gone-1".into(),
        };

        assert_eq!(
            duplicate(&mut doc, &Selection::Idle, &mut ids),
            Err(MutationError::NothingSelected)
        );
        assert_eq!(
            remove(&mut doc, &stale),
            Err(MutationError::NodeNotFound("gone-1".into()))
        );
        assert!(modify(&mut doc, &stale, &Fields::new()).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_action_wire_format() {
        let action: EditAction =
            serde_json::from_value(json!({"type": "setField", "key": "text", "value": "Hi"}))
                .unwrap();
        assert_eq!(
            action,
            EditAction::SetField {
                key: "text".to_string(),
                value: "Hi".to_string()
            }
        );

        let select: EditAction = serde_json::from_value(json!({"type": "select"})).unwrap();
        assert_eq!(select, EditAction::Select { id: None });
        assert!(EditAction::Modify { fields: None }.is_structural());
        assert!(!EditAction::Cancel.is_structural());
    }
}
