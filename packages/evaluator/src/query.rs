//! Lookups over a rendered tree: marker nodes, positions, attribute matches.

use crate::vdom::{Marker, VNode, VirtualDomDocument};
use pagebuilder_model::{attributes, ElementData, NodeId, NodePath};

/// All `main` nodes in document order
pub fn main_nodes(vdom: &VirtualDomDocument) -> Vec<&VNode> {
    let mut out = Vec::new();
    for node in &vdom.nodes {
        collect(node, Marker::Main, &mut out);
    }
    out
}

/// `item` nodes beneath a `main` node, in document order
pub fn item_nodes(main: &VNode) -> Vec<&VNode> {
    let mut out = Vec::new();
    for child in main.children() {
        collect(child, Marker::Item, &mut out);
    }
    out
}

fn collect<'a>(node: &'a VNode, marker: Marker, out: &mut Vec<&'a VNode>) {
    match node.marker() {
        Some(m) if m == marker => {
            out.push(node);
            return;
        }
        // Items never belong to a nested section
        Some(Marker::Main) if marker == Marker::Item => return,
        _ => {}
    }
    for child in node.children() {
        collect(child, marker, out);
    }
}

/// Positional address of a node that lives in `vdom`.
///
/// `None` when the node is not part of this tree (for example a node kept
/// from an earlier render) or carries no marker class.
pub fn locate(vdom: &VirtualDomDocument, node: &VNode) -> Option<NodePath> {
    let mains = main_nodes(vdom);
    match node.marker()? {
        Marker::Main => {
            let section_index = mains.iter().position(|m| std::ptr::eq(*m, node))?;
            Some(NodePath {
                section_index,
                item_index: None,
            })
        }
        Marker::Item => mains.iter().enumerate().find_map(|(section_index, main)| {
            item_nodes(main)
                .iter()
                .position(|item| std::ptr::eq(*item, node))
                .map(|item_index| NodePath {
                    section_index,
                    item_index: Some(item_index),
                })
        }),
    }
}

/// The `main` node containing `node`, or the node itself when it is a `main`
pub fn owning_main<'a>(vdom: &'a VirtualDomDocument, node: &VNode) -> Option<&'a VNode> {
    let path = locate(vdom, node)?;
    main_nodes(vdom).get(path.section_index).copied()
}

pub fn find_by_node_id<'a>(nodes: &'a [VNode], id: &NodeId) -> Option<&'a VNode> {
    for node in nodes {
        if node.node_id() == Some(id) {
            return Some(node);
        }
        if let Some(found) = find_by_node_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

pub fn find_by_node_id_mut<'a>(nodes: &'a mut [VNode], id: &NodeId) -> Option<&'a mut VNode> {
    for node in nodes {
        if node.node_id() == Some(id) {
            return Some(node);
        }
        if let VNode::Element { children, .. } = node {
            if let Some(found) = find_by_node_id_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// First `main` node whose `data-*` attributes contain every given pair
pub fn find_main_matching<'a>(vdom: &'a VirtualDomDocument, data: &ElementData) -> Option<&'a VNode> {
    if data.is_empty() {
        return None;
    }
    main_nodes(vdom).into_iter().find(|node| {
        node.attributes()
            .map(|attrs| attributes::matches_data(attrs, data))
            .unwrap_or(false)
    })
}

/// Element data of a rendered node (`data-temp_id` excluded)
pub fn element_data_of(node: &VNode) -> ElementData {
    node.attributes()
        .map(|attrs| attributes::element_data(attrs))
        .unwrap_or_default()
}

/// Apply `f` to every `main` and `item` node
pub fn visit_marked_mut(nodes: &mut [VNode], f: &mut impl FnMut(&mut VNode)) {
    for node in nodes {
        if node.marker().is_some() {
            f(node);
        }
        if let VNode::Element { children, .. } = node {
            visit_marked_mut(children, f);
        }
    }
}
