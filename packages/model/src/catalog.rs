//! Storefront catalog data used by `product_carousel` sections.

use serde::{Deserialize, Serialize};

pub const COLLECTION_GID_PREFIX: &str = "gid://shopify/Collection/";

/// A collection with its first page of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Entry of the collection picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
}

/// Global id of a collection referenced by a section's `collection_id`
pub fn collection_gid(collection_id: &str) -> String {
    if collection_id.starts_with(COLLECTION_GID_PREFIX) {
        collection_id.to_string()
    } else {
        format!("{}{}", COLLECTION_GID_PREFIX, collection_id)
    }
}

pub fn find_collection<'a>(collections: &'a [Collection], collection_id: &str) -> Option<&'a Collection> {
    let gid = collection_gid(collection_id);
    collections.iter().find(|c| c.id == gid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_gid() {
        assert_eq!(collection_gid("42"), "gid://shopify/Collection/42");
        assert_eq!(
            collection_gid("gid://shopify/Collection/42"),
            "gid://shopify/Collection/42"
        );
    }

    #[test]
    fn test_find_collection() {
        let collections = vec![Collection {
            id: "gid://shopify/Collection/7".to_string(),
            title: "Summer".to_string(),
            products: vec![],
        }];

        assert_eq!(find_collection(&collections, "7").map(|c| c.title.as_str()), Some("Summer"));
        assert!(find_collection(&collections, "8").is_none());
    }
}
