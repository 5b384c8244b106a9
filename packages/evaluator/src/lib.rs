//! # Pagebuilder Evaluator
//!
//! Turns a home page [`Document`](pagebuilder_model::Document) into the live
//! mobile preview: a virtual DOM whose `main`/`item` containers mirror the
//! data they were rendered from, plus HTML serialization of that tree.

pub mod html;
pub mod projector;
pub mod query;
pub mod sections;
pub mod style;
pub mod vdom;


pub use html::{render_fragment, render_page, HtmlOptions, PageOptions};
pub use projector::{project, ProjectOptions};
pub use query::{
    element_data_of, find_by_node_id, find_main_matching, item_nodes, locate, main_nodes,
    owning_main,
};
pub use style::{clear_highlights, highlight, HIGHLIGHT_BORDER, HIGHLIGHT_RADIUS};
pub use vdom::{CssRule, Marker, VNode, VirtualDomDocument, ITEM_CLASS, MAIN_CLASS};
