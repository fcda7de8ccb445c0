use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Item, ItemId},
    error::ErrorBody,
    protocol::{item_route, items_route, ItemPayload},
};
use tracing::{debug, error};

pub mod config;
pub mod controller;
pub mod error;

pub use config::{load_settings, normalize_base_url, ClientSettings};
pub use controller::{
    events::{DeleteOutcome, SubmitOutcome},
    orchestration::ItemListController,
    reducer::EditorState,
    surface::{DisplaySurface, ItemForm, ItemRow, ListRow, RowAction},
};
pub use error::{ClientError, ErrorCategory, ValidationError};

/// REST operations against the items collection.
#[async_trait]
pub trait ItemsApi: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;
    async fn get_item(&self, id: ItemId) -> Result<Item, ClientError>;
    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, ClientError>;
    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> Result<Item, ClientError>;
    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpItemsApi {
    http: Client,
    base_url: String,
}

impl HttpItemsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }
}

#[async_trait]
impl ItemsApi for HttpItemsApi {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let url = self.url(items_route());
        debug!(%url, "GET items");
        let res = self.http.get(url).send().await?;
        decode_json(ensure_success(res).await?).await
    }

    async fn get_item(&self, id: ItemId) -> Result<Item, ClientError> {
        let url = self.url(&item_route(id));
        debug!(%url, "GET item");
        let res = self.http.get(url).send().await?;
        decode_json(ensure_success(res).await?).await
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, ClientError> {
        let url = self.url(items_route());
        debug!(%url, "POST item");
        let res = self.http.post(url).json(payload).send().await?;
        decode_json(ensure_success(res).await?).await
    }

    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> Result<Item, ClientError> {
        let url = self.url(&item_route(id));
        debug!(%url, "PUT item");
        let res = self.http.put(url).json(payload).send().await?;
        decode_json(ensure_success(res).await?).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError> {
        let url = self.url(&item_route(id));
        debug!(%url, "DELETE item");
        let res = self.http.delete(url).send().await?;
        // 204 is the contract, but any 2xx counts and its body is ignored.
        ensure_success(res).await?;
        Ok(())
    }
}

/// Maps a non-2xx response to [`ClientError::Server`], decoding the
/// `{"detail": ...}` body when one can be read.
async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let detail = match res.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message()),
        Err(err) => {
            error!("failed to read error body for status {status}: {err}");
            None
        }
    };
    Err(ClientError::Server { status, detail })
}

async fn decode_json<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    let body = res.bytes().await?;
    if status == StatusCode::NO_CONTENT || body.is_empty() {
        return Err(ClientError::Decode(format!(
            "expected a JSON body but status {} carried none",
            status.as_u16()
        )));
    }
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
