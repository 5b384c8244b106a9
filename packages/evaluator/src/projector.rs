//! # Render Tree Projector
//!
//! Maps a [`Document`] onto a virtual DOM, one `main` container per section
//! and one `item` container per image entry, each mirroring its fields as
//! `data-*` attributes plus the `data-temp_id` bookkeeping attribute.
//!
//! Projection is pure: the same document and options always produce the
//! same tree, so re-rendering after every edit is cheap to reason about.

use crate::sections;
use crate::style::highlight;
use crate::vdom::{VNode, VirtualDomDocument, MAIN_CLASS};
use pagebuilder_model::{
    attributes, find_collection, Collection, Document, NodeId, Section, SectionKind, TEMP_ID_KEY,
};

/// Inputs besides the document itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectOptions<'a> {
    /// Catalog used by `product_carousel` sections
    pub collections: &'a [Collection],
    /// Node to highlight
    pub selected: Option<&'a NodeId>,
}

pub fn project(document: &Document, options: &ProjectOptions<'_>) -> VirtualDomDocument {
    let mut vdom = VirtualDomDocument::new();
    add_preview_styles(&mut vdom);

    let sections = document
        .home_page
        .iter()
        .map(|section| project_section(section, options))
        .collect();
    vdom.add_node(
        VNode::element("div")
            .with_class("mobile-view")
            .with_children(sections),
    );

    if let Some(id) = options.selected {
        if !highlight(&mut vdom, id) {
            tracing::debug!(%id, "selected node is not rendered");
        }
    }

    vdom
}

fn project_section(section: &Section, options: &ProjectOptions<'_>) -> VNode {
    let container = VNode::element("div")
        .with_class(MAIN_CLASS)
        .with_attrs(attributes::encode(&section.form_fields()))
        .with_attr(
            attributes::data_attribute_name(TEMP_ID_KEY),
            section.id.as_str(),
        )
        .with_node_id(section.id.clone());

    let content = match section.kind() {
        SectionKind::Topbar { text } => Some(sections::topbar(text)),
        SectionKind::Carousel { items } => Some(sections::carousel(items)),
        SectionKind::Banner { items } => Some(sections::banner(items)),
        SectionKind::Heading(props) => Some(sections::heading(&props)),
        SectionKind::ProductCarousel { collection_id } => {
            let collection = collection_id
                .as_deref()
                .and_then(|id| find_collection(options.collections, id));
            if collection.is_none() {
                tracing::debug!(?collection_id, "no catalog entry for product carousel");
            }
            Some(sections::product_carousel(collection))
        }
        SectionKind::Unknown { type_name } => {
            tracing::debug!(type_name, "no renderer for section type");
            None
        }
    };

    match content {
        Some(content) => container.with_child(content),
        None => container,
    }
}

fn add_preview_styles(vdom: &mut VirtualDomDocument) {
    vdom.add_style(
        ".mobile-view",
        &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("gap", "12px"),
            ("max-width", "390px"),
            ("margin", "0 auto"),
        ],
    );
    vdom.add_style(".main", &[("cursor", "pointer")]);
    vdom.add_style(
        ".topbar",
        &[
            ("background", "#000"),
            ("color", "#fff"),
            ("overflow", "hidden"),
            ("white-space", "nowrap"),
        ],
    );
    vdom.add_style(".topbar .scroll", &[("padding", "6px 0")]);
    vdom.add_style(
        ".carousel__container, .product_carousel__container",
        &[("display", "flex"), ("overflow-x", "auto"), ("gap", "8px")],
    );
    vdom.add_style(".carousel__slide", &[("flex", "0 0 30%")]);
    vdom.add_style(".product_carousel__slide", &[("flex", "0 0 45%")]);
    vdom.add_style(
        ".banner",
        &[("display", "flex"), ("flex-direction", "column"), ("gap", "8px")],
    );
    vdom.add_style("img", &[("width", "100%"), ("display", "block")]);
    vdom.add_style(".label", &[("font-weight", "bold"), ("text-align", "center")]);
    vdom.add_style(".heading", &[("padding", "8px 12px")]);
}
