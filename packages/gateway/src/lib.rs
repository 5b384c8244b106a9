//! # Pagebuilder Gateway
//!
//! Outbound HTTP: the page data backend ([`BackendClient`]) and the shop
//! catalog ([`CatalogClient`]).
//!
//! Failures are returned to the caller, which logs them; nothing here
//! retries.

pub mod backend;
pub mod catalog;
pub mod error;

pub use backend::BackendClient;
pub use catalog::{load_catalog, CatalogClient, ShopCredentials, DEFAULT_API_VERSION};
pub use error::{CatalogError, ClientError, FetchError, PersistError, UploadError};
