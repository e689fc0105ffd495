//! Blocking HTTP client for the item CRUD API

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use larder_core::{Item, ItemDraft};

/// Client-side request errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never completed (connection refused, timeout, bad body)
    #[error("Request failed: {0}")]
    Request(String),

    /// Mutation target does not exist on the server
    #[error("Item not found")]
    NotFound,

    /// Any other non-success response
    #[error("Server error: {0}")]
    Server(StatusCode),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[allow(dead_code)]
    message: String,
    item: Item,
}

/// HTTP client for the item service. No retries, no request
/// de-duplication; transport defaults are the only timeouts.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.client.get(self.url("/items")).send()?;
        Ok(Self::check(response)?.json()?)
    }

    pub fn create_item(&self, draft: &ItemDraft) -> Result<Item, ClientError> {
        let response = self.client.post(self.url("/items")).json(draft).send()?;
        Ok(Self::check(response)?.json()?)
    }

    pub fn update_item(&self, id: i64, draft: &ItemDraft) -> Result<Item, ClientError> {
        let response = self
            .client
            .put(format!("{}/items/{id}", self.base_url))
            .json(draft)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Delete an item, returning the removed row's prior contents.
    pub fn delete_item(&self, id: i64) -> Result<Item, ClientError> {
        let response = self
            .client
            .delete(format!("{}/items/{id}", self.base_url))
            .send()?;
        let body: DeleteResponse = Self::check(response)?.json()?;
        Ok(body.item)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn check(response: Response) -> Result<Response, ClientError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status => Err(ClientError::Server(status)),
        }
    }
}
