//! # Catalog Client
//!
//! Reads collections and products from the shop's GraphQL Admin API for
//! `product_carousel` sections and the collection picker.

use crate::error::CatalogError;
use pagebuilder_model::{collection_gid, Collection, CollectionSummary, Document, Product};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2024-10";

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const COLLECTION_PRODUCTS_QUERY: &str = r#"
query getCollectionProducts($id: ID!) {
  collection(id: $id) {
    id
    title
    products(first: 10) {
      edges {
        node {
          id
          title
          media(first: 1) {
            edges { node { preview { image { url altText } } } }
          }
          variants(first: 1) {
            edges { node { price } }
          }
        }
      }
    }
  }
}"#;

const ALL_COLLECTIONS_QUERY: &str = r#"
query getAllCollections {
  collections(first: 20) {
    edges {
      node {
        id
        title
        image { url altText }
      }
    }
  }
}"#;

/// Shop the catalog is read from
#[derive(Debug, Clone, PartialEq)]
pub struct ShopCredentials {
    /// e.g. `my-shop.myshopify.com`
    pub domain: String,
    pub access_token: String,
    pub api_version: String,
}

impl ShopCredentials {
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.domain, self.api_version
        )
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl CatalogClient {
    pub fn new(shop: &ShopCredentials, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(shop.endpoint(), shop.access_token.clone(), timeout)
    }

    /// Client for an explicit GraphQL endpoint
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, CatalogError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(CatalogError::GraphQl(messages.join("; ")));
        }
        body.data
            .ok_or_else(|| CatalogError::GraphQl("response has no data".to_string()))
    }

    /// First page of products of the collection referenced by a section's
    /// `collection_id` (numeric id or full gid)
    pub async fn collection_products(&self, collection_id: &str) -> Result<Collection, CatalogError> {
        let gid = collection_gid(collection_id);
        let data: CollectionData = self
            .query(COLLECTION_PRODUCTS_QUERY, json!({ "id": gid }))
            .await?;
        let collection = data
            .collection
            .ok_or(CatalogError::CollectionNotFound(gid))?;

        Ok(Collection {
            id: collection.id,
            title: collection.title,
            products: collection
                .products
                .edges
                .into_iter()
                .map(|edge| edge.node.into_product())
                .collect(),
        })
    }

    /// Collections offered by the collection picker
    pub async fn all_collections(&self) -> Result<Vec<CollectionSummary>, CatalogError> {
        let data: CollectionsData = self.query(ALL_COLLECTIONS_QUERY, json!({})).await?;
        Ok(data
            .collections
            .edges
            .into_iter()
            .map(|edge| {
                let image = edge.node.image;
                CollectionSummary {
                    id: edge.node.id,
                    title: edge.node.title,
                    image_url: image.as_ref().map(|i| i.url.clone()),
                    image_alt: image.and_then(|i| i.alt_text),
                }
            })
            .collect())
    }
}

/// Fetch every collection shown by the document's product carousels.
///
/// Collections that fail to load are logged and left out; their carousels
/// render empty.
pub async fn load_catalog(client: &CatalogClient, document: &Document) -> Vec<Collection> {
    let mut collections = Vec::new();
    for collection_id in document.collection_ids() {
        match client.collection_products(&collection_id).await {
            Ok(collection) => collections.push(collection),
            Err(err) => {
                tracing::warn!(collection_id = %collection_id, error = %err, "failed to load collection")
            }
        }
    }
    collections
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct CollectionData {
    collection: Option<CollectionNode>,
}

#[derive(Debug, Deserialize)]
struct CollectionNode {
    id: String,
    title: String,
    products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    id: String,
    title: String,
    media: Connection<MediaNode>,
    variants: Connection<VariantNode>,
}

impl ProductNode {
    fn into_product(self) -> Product {
        let image = self
            .media
            .edges
            .into_iter()
            .next()
            .and_then(|edge| edge.node.preview)
            .and_then(|preview| preview.image);
        let price = self
            .variants
            .edges
            .into_iter()
            .next()
            .and_then(|edge| edge.node.price)
            .map(|price| match price {
                Value::String(s) => s,
                other => other.to_string(),
            });

        Product {
            id: self.id,
            title: self.title,
            image_url: image.as_ref().map(|i| i.url.clone()),
            image_alt: image.and_then(|i| i.alt_text),
            price,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    preview: Option<Preview>,
}

#[derive(Debug, Deserialize)]
struct Preview {
    image: Option<ImageNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageNode {
    url: String,
    alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VariantNode {
    price: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CollectionsData {
    collections: Connection<CollectionSummaryNode>,
}

#[derive(Debug, Deserialize)]
struct CollectionSummaryNode {
    id: String,
    title: String,
    image: Option<ImageNode>,
}
