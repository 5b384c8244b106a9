//! # Home Page Document
//!
//! The JSON document edited by the page builder:
//!
//! ```text
//! { "home_page": [Section, ...], "location_list": [String, ...], ... }
//! ```
//!
//! Sections and items are open records. Known keys are exposed through
//! [`SectionKind`], everything else passes through untouched so a
//! fetch → edit → persist cycle never drops data the editor does not know.
//!
//! Position is not identity here: every section and item carries a
//! [`NodeId`] assigned when it enters the editor. Ids are skipped by serde.

use crate::attributes::{display_value, IMAGES_KEY, TEMP_ID_KEY};
use crate::error::ModelError;
use crate::id_generator::{IdGenerator, NodeId};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Ordered open field map of a section or item
pub type Fields = Map<String, Value>;

const TYPE_KEY: &str = "type";

/// Keys the editor owns; edit overlays never write them.
pub const RESERVED_KEYS: &[&str] = &[IMAGES_KEY, TEMP_ID_KEY];

/// Section `type` discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionType {
    Topbar,
    Carousel,
    Banner,
    Heading,
    ProductCarousel,
    /// Unrecognized type. Empty when the section has no `type` key.
    Other(String),
}

impl SectionType {
    pub fn parse(s: &str) -> Self {
        match s {
            "topbar" => SectionType::Topbar,
            "carousel" => SectionType::Carousel,
            "banner" => SectionType::Banner,
            "heading" => SectionType::Heading,
            "product_carousel" => SectionType::ProductCarousel,
            other => SectionType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionType::Topbar => "topbar",
            SectionType::Carousel => "carousel",
            SectionType::Banner => "banner",
            SectionType::Heading => "heading",
            SectionType::ProductCarousel => "product_carousel",
            SectionType::Other(s) => s,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SectionType::Other(s) if s.is_empty())
    }
}

impl Default for SectionType {
    fn default() -> Self {
        SectionType::Other(String::new())
    }
}

impl Serialize for SectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string discriminators survive as their display form
        let value = Value::deserialize(deserializer)?;
        Ok(SectionType::parse(&display_value(&value)))
    }
}

/// One entry in a section's `images` list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip)]
    pub id: NodeId,

    #[serde(flatten)]
    pub fields: Fields,
}

impl Item {
    pub fn new(fields: Fields) -> Self {
        Self {
            id: NodeId::default(),
            fields,
        }
    }

    pub fn src(&self) -> Option<&str> {
        self.fields.get("src").and_then(Value::as_str)
    }

    pub fn label(&self) -> Option<&str> {
        self.fields.get("label").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Shallow overlay: every key in `overlay` replaces the item's value.
    pub fn merge(&mut self, overlay: &Fields) {
        merge_fields(&mut self.fields, overlay);
    }

    /// Copy with a fresh identity
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.new_id(),
            fields: self.fields.clone(),
        }
    }

    /// Fields as presented in the edit form
    pub fn form_fields(&self) -> Fields {
        let mut form = self.fields.clone();
        form.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
        form
    }
}

/// Structural equality; identity is not compared
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

/// One ordered entry in `home_page`
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub id: NodeId,
    pub section_type: SectionType,
    pub fields: Fields,
    pub images: Option<Vec<Item>>,
    /// Non-string `type` as read, written back unchanged
    raw_type: Option<Value>,
    /// Key order as read, so `type` and `images` keep their positions
    key_order: Vec<String>,
}

/// Structural equality; identity and key order are not compared
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.section_type == other.section_type
            && self.raw_type == other.raw_type
            && self.fields == other.fields
            && self.images == other.images
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let mut type_written = self.section_type.is_missing() && self.raw_type.is_none();
        let mut images_written = self.images.is_none();

        for key in &self.key_order {
            match key.as_str() {
                TYPE_KEY => {
                    if !type_written {
                        self.serialize_type(&mut map)?;
                        type_written = true;
                    }
                }
                IMAGES_KEY => {
                    if !images_written {
                        map.serialize_entry(IMAGES_KEY, &self.images)?;
                        images_written = true;
                    }
                }
                _ => {
                    if let Some(value) = self.fields.get(key) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }

        if !type_written {
            self.serialize_type(&mut map)?;
        }
        for (key, value) in &self.fields {
            if key != TYPE_KEY && key != IMAGES_KEY && !self.key_order.contains(key) {
                map.serialize_entry(key, value)?;
            }
        }
        if !images_written {
            map.serialize_entry(IMAGES_KEY, &self.images)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Fields::deserialize(deserializer)?;
        let mut section = Section {
            key_order: record.keys().cloned().collect(),
            ..Default::default()
        };

        for (key, value) in record {
            match key.as_str() {
                TYPE_KEY => match value {
                    Value::String(name) => section.section_type = SectionType::parse(&name),
                    other => {
                        section.section_type = SectionType::parse(&display_value(&other));
                        section.raw_type = Some(other);
                    }
                },
                IMAGES_KEY => {
                    section.images = serde_json::from_value(value).map_err(D::Error::custom)?;
                }
                _ => {
                    section.fields.insert(key, value);
                }
            }
        }
        Ok(section)
    }
}

/// Typed view of a section by its `type`
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind<'a> {
    Topbar { text: Option<&'a str> },
    Carousel { items: &'a [Item] },
    Banner { items: &'a [Item] },
    Heading(HeadingProps<'a>),
    ProductCarousel { collection_id: Option<String> },
    Unknown { type_name: &'a str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingProps<'a> {
    pub text: Option<&'a str>,
    pub background_color: Vec<&'a str>,
    pub font_size: Option<f64>,
    /// Every field, for style projection
    pub fields: &'a Fields,
}

impl Section {
    pub fn new(section_type: SectionType) -> Self {
        Self {
            section_type,
            ..Default::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_images(mut self, images: Vec<Item>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn kind(&self) -> SectionKind<'_> {
        match &self.section_type {
            SectionType::Topbar => SectionKind::Topbar { text: self.text() },
            SectionType::Carousel => SectionKind::Carousel { items: self.items() },
            SectionType::Banner => SectionKind::Banner { items: self.items() },
            SectionType::Heading => SectionKind::Heading(HeadingProps {
                text: self.text(),
                background_color: self
                    .fields
                    .get("background-color")
                    .and_then(Value::as_array)
                    .map(|colors| colors.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default(),
                font_size: self.fields.get("font-size").and_then(as_number),
                fields: &self.fields,
            }),
            SectionType::ProductCarousel => SectionKind::ProductCarousel {
                collection_id: self.fields.get("collection_id").map(display_value),
            },
            SectionType::Other(type_name) => SectionKind::Unknown { type_name },
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.fields.get("text").and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Items of the section, empty when it has no `images`
    pub fn items(&self) -> &[Item] {
        self.images.as_deref().unwrap_or(&[])
    }

    pub fn item_index(&self, id: &NodeId) -> Option<usize> {
        self.items().iter().position(|item| &item.id == id)
    }

    /// Shallow overlay onto the section. A `type` key re-tags the section.
    pub fn merge(&mut self, overlay: &Fields) {
        let mut rest = overlay.clone();
        if let Some(section_type) = rest.remove(TYPE_KEY) {
            self.section_type = SectionType::parse(&display_value(&section_type));
            self.raw_type = None;
        }
        merge_fields(&mut self.fields, &rest);
    }

    /// Deep copy with fresh identities for the section and all of its items
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.new_id(),
            section_type: self.section_type.clone(),
            fields: self.fields.clone(),
            images: self
                .images
                .as_ref()
                .map(|items| items.iter().map(|item| item.duplicate(ids)).collect()),
            raw_type: self.raw_type.clone(),
            key_order: self.key_order.clone(),
        }
    }

    fn serialize_type<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match &self.raw_type {
            Some(raw) => map.serialize_entry(TYPE_KEY, raw),
            None => map.serialize_entry(TYPE_KEY, &self.section_type),
        }
    }

    /// Fields as presented in the edit form (`type` first, `images` excluded)
    pub fn form_fields(&self) -> Fields {
        let mut form = Fields::new();
        if !self.section_type.is_missing() {
            form.insert(
                "type".to_string(),
                Value::String(self.section_type.as_str().to_string()),
            );
        }
        for (key, value) in &self.fields {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                form.insert(key.clone(), value.clone());
            }
        }
        form
    }
}

fn merge_fields(target: &mut Fields, overlay: &Fields) {
    for (key, value) in overlay {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The whole editable page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub home_page: Vec<Section>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location_list: Vec<String>,

    /// Top-level keys the editor does not interpret
    #[serde(flatten)]
    pub extra: Fields,
}

/// Positional address of a section or item in `home_page`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePath {
    pub section_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
}

/// Body of `POST /api/data/update`
#[derive(Debug, Serialize)]
pub struct UpdatePayload<'a> {
    pub home_page: &'a [Section],
}

impl Document {
    /// Parse document JSON. Ids are left unassigned.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ModelError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Pretty JSON with two-space indentation, as shown in the raw-text editor
    pub fn to_pretty_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn update_payload(&self) -> UpdatePayload<'_> {
        UpdatePayload {
            home_page: &self.home_page,
        }
    }

    /// Give every section and item without an id a fresh one
    pub fn assign_ids(&mut self, ids: &mut IdGenerator) {
        for section in &mut self.home_page {
            if section.id.is_unassigned() {
                section.id = ids.new_id();
            }
            if let Some(items) = &mut section.images {
                for item in items {
                    if item.id.is_unassigned() {
                        item.id = ids.new_id();
                    }
                }
            }
        }
    }

    /// Carry identities over from `previous` by position, then assign fresh
    /// ids to positions `previous` did not have.
    pub fn inherit_ids(&mut self, previous: &Document, ids: &mut IdGenerator) {
        for (section, old) in self.home_page.iter_mut().zip(&previous.home_page) {
            section.id = old.id.clone();
            if let Some(items) = &mut section.images {
                for (item, old_item) in items.iter_mut().zip(old.items()) {
                    item.id = old_item.id.clone();
                }
            }
        }
        self.assign_ids(ids);
    }

    pub fn section_index(&self, id: &NodeId) -> Option<usize> {
        self.home_page.iter().position(|section| &section.id == id)
    }

    pub fn section(&self, id: &NodeId) -> Option<&Section> {
        self.home_page.iter().find(|section| &section.id == id)
    }

    pub fn section_mut(&mut self, id: &NodeId) -> Option<&mut Section> {
        self.home_page.iter_mut().find(|section| &section.id == id)
    }

    /// Locate an item anywhere in the page: `(section_index, item_index)`
    pub fn locate_item(&self, id: &NodeId) -> Option<(usize, usize)> {
        self.home_page
            .iter()
            .enumerate()
            .find_map(|(si, section)| section.item_index(id).map(|ii| (si, ii)))
    }

    /// Current position of a section or item id
    pub fn path_of(&self, id: &NodeId) -> Option<NodePath> {
        if let Some(section_index) = self.section_index(id) {
            return Some(NodePath {
                section_index,
                item_index: None,
            });
        }
        self.locate_item(id).map(|(section_index, item_index)| NodePath {
            section_index,
            item_index: Some(item_index),
        })
    }

    pub fn item(&self, id: &NodeId) -> Option<&Item> {
        let (si, ii) = self.locate_item(id)?;
        self.home_page[si].items().get(ii)
    }

    /// Collection ids referenced by `product_carousel` sections, in page order
    pub fn collection_ids(&self) -> Vec<String> {
        self.home_page
            .iter()
            .filter_map(|section| match section.kind() {
                SectionKind::ProductCarousel { collection_id } => collection_id,
                _ => None,
            })
            .collect()
    }
}
