//! # Pagebuilder Model
//!
//! Data model of the storefront home page: the [`Document`] of ordered
//! [`Section`]s and their [`Item`]s, stable [`NodeId`]s, the `data-*`
//! attribute codec and the catalog types shown by product carousels.

pub mod attributes;
pub mod catalog;
pub mod document;
pub mod error;
pub mod id_generator;

pub use attributes::{data_key, element_data, matches_data, ElementData, TEMP_ID_KEY};
pub use catalog::{collection_gid, find_collection, Collection, CollectionSummary, Product};
pub use document::{
    Document, Fields, HeadingProps, Item, NodePath, Section, SectionKind, SectionType, UpdatePayload,
};
pub use error::{ModelError, ModelResult};
pub use id_generator::{get_document_id, IdGenerator, NodeId};
