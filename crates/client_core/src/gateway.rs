//! Remote items collection: the gateway seam and its HTTP implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Item, ItemDraft, ItemId},
    protocol::{inventory_item_path, CreateItemRequest, INVENTORY_COLLECTION},
};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::TransportError};

/// Confirmation returned by the remote collection for a deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveReceipt {
    pub item_id: ItemId,
    pub body: serde_json::Value,
}

/// Single-round-trip access to the remote items collection. Implementations hold no state.
#[async_trait]
pub trait ItemsGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, TransportError>;
    /// Only the draft's name and status are transmitted.
    async fn create(&self, draft: &ItemDraft) -> Result<Item, TransportError>;
    /// `None` when the endpoint acknowledged the call without a body.
    async fn remove(&self, item_id: ItemId) -> Result<Option<RemoveReceipt>, TransportError>;
}

pub struct HttpItemsGateway {
    http: Client,
    api_base: Url,
    auth_token: Option<String>,
}

impl HttpItemsGateway {
    pub fn new(api_url: &str, auth_token: Option<String>) -> Result<Self, TransportError> {
        Ok(Self {
            http: Client::new(),
            api_base: normalize_base(api_url)?,
            auth_token,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, TransportError> {
        Self::new(&settings.api_url, settings.api_token.clone())
    }

    pub fn collection_url(&self) -> Result<Url, TransportError> {
        Ok(self.api_base.join(INVENTORY_COLLECTION)?)
    }

    fn item_url(&self, item_id: ItemId) -> Result<Url, TransportError> {
        Ok(self.api_base.join(&inventory_item_path(item_id))?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ItemsGateway for HttpItemsGateway {
    async fn list(&self) -> Result<Vec<Item>, TransportError> {
        let url = self.collection_url()?;
        debug!(%url, "listing inventory items");
        let response = self.authorize(self.http.get(url)).send().await?;
        decode_json(response).await
    }

    async fn create(&self, draft: &ItemDraft) -> Result<Item, TransportError> {
        let url = self.collection_url()?;
        debug!(%url, name = %draft.name, "creating inventory item");
        let response = self
            .authorize(self.http.post(url))
            .json(&CreateItemRequest::from(draft))
            .send()
            .await?;
        decode_json(response).await
    }

    async fn remove(&self, item_id: ItemId) -> Result<Option<RemoveReceipt>, TransportError> {
        let url = self.item_url(item_id)?;
        debug!(%url, "removing inventory item");
        let response = self.authorize(self.http.delete(url)).send().await?;
        let bytes = success_body(response).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        if body.is_null() {
            return Ok(None);
        }
        Ok(Some(RemoveReceipt { item_id, body }))
    }
}

fn normalize_base(api_url: &str) -> Result<Url, TransportError> {
    let mut base = Url::parse(api_url.trim())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

async fn success_body(response: Response) -> Result<Vec<u8>, TransportError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.bytes().await?.to_vec())
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let bytes = success_body(response).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
