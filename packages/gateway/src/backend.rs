//! # Backend Client
//!
//! The page data service:
//!
//! ```text
//! GET  /api/data          → { home_page, location_list, ... }
//! POST /api/data/update   ← { home_page }          → {}
//! POST /api/image/upload  ← multipart "image"      → { url } | { error }
//! ```
//!
//! A successful persist is not reconciled locally: callers refetch the
//! document with [`BackendClient::fetch_document`] and start over.

use crate::error::{FetchError, PersistError, UploadError};
use pagebuilder_model::Document;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DATA_PATH: &str = "/api/data";
pub const UPDATE_PATH: &str = "/api/data/update";
pub const UPLOAD_PATH: &str = "/api/image/upload";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: Option<String>,
    error: Option<String>,
}

impl BackendClient {
    /// Client for the backend at `base_url`. Requests wait indefinitely
    /// unless a `timeout` is given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the current document. Ids are not assigned.
    pub async fn fetch_document(&self) -> Result<Document, FetchError> {
        let response = self.client.get(self.url(DATA_PATH)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let document = Document::from_json(&body)?;
        tracing::info!(
            sections = document.home_page.len(),
            "fetched document from {}",
            self.base_url
        );
        Ok(document)
    }

    /// Send `{ home_page }` to the backend
    pub async fn persist(&self, document: &Document) -> Result<(), PersistError> {
        let response = self
            .client
            .post(self.url(UPDATE_PATH))
            .json(&document.update_payload())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "backend rejected update");
            return Err(PersistError::Status {
                status: status.as_u16(),
            });
        }

        tracing::info!(sections = document.home_page.len(), "persisted home page");
        Ok(())
    }

    /// Upload an image and return its public url
    pub async fn upload_image(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime: Option<&str>,
    ) -> Result<String, UploadError> {
        let mut part = Part::bytes(bytes).file_name(file_name.into());
        if let Some(mime) = mime {
            part = part.mime_str(mime)?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(UploadResponse {
                error: Some(error), ..
            }) => Err(UploadError::Rejected(error)),
            Ok(UploadResponse { url: Some(url), .. }) if status.is_success() => Ok(url),
            _ if !status.is_success() => Err(UploadError::Status {
                status: status.as_u16(),
            }),
            _ => Err(UploadError::MissingUrl),
        }
    }
}
