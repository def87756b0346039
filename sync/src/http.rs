//! HTTP backend for the quiz REST API.

use std::time::Duration;

use async_trait::async_trait;
use quiz_order_engine::{AttachRequest, Item, ReorderRequest};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::{BackendError, OrderBackend};
use crate::config::Config;

/// Talks to `GET {collection}`, `POST {collection}/reorder`,
/// `DELETE {collection}/item/{id}` and `POST {collection}`, which both
/// attaches existing items (`{"itemIds": [...]}`) and creates new ones.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    collection_url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl HttpBackend {
    /// Create a backend from configuration.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        let collection_url = Url::parse(&config.collection_url())
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", config.collection_url(), e)))?;

        if collection_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(collection_url.to_string()));
        }

        Ok(Self {
            client,
            collection_url,
            token: config.token.clone(),
            timeout: config.request_timeout,
        })
    }

    /// The collection URL requests are made against.
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// Collection URL with extra path segments, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, BackendError> {
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn map_send_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Http(err)
        }
    }
}

#[async_trait]
impl OrderBackend for HttpBackend {
    async fn fetch_order(&self) -> Result<Vec<Item>, BackendError> {
        let url = self.endpoint(&[]);
        tracing::debug!(%url, "Fetching collection order");

        let response = self.send(self.client.get(url)).await?;
        self.decode(response).await
    }

    async fn persist_order(&self, request: &ReorderRequest) -> Result<(), BackendError> {
        let url = self.endpoint(&["reorder"]);
        tracing::debug!(%url, len = request.len(), "Persisting collection order");

        self.send(self.client.post(url).json(request)).await?;
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["item", id]);
        tracing::debug!(%url, item_id = %id, "Deleting item");

        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn attach_items(&self, request: &AttachRequest) -> Result<(), BackendError> {
        let url = self.endpoint(&[]);
        tracing::debug!(%url, count = request.item_ids.len(), "Attaching items");

        self.send(self.client.post(url).json(request)).await?;
        Ok(())
    }

    async fn create_item(&self, payload: &Value) -> Result<Item, BackendError> {
        let url = self.endpoint(&[]);
        tracing::debug!(%url, "Creating item");

        let response = self.send(self.client.post(url).json(payload)).await?;
        self.decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str, path: &str) -> HttpBackend {
        HttpBackend::new(&Config::new(base).with_collection_path(path)).unwrap()
    }

    #[test]
    fn endpoints() {
        let backend = backend("http://localhost:3000/", "/api/admin/quiz/42/questions");

        assert_eq!(
            backend.endpoint(&[]).as_str(),
            "http://localhost:3000/api/admin/quiz/42/questions"
        );
        assert_eq!(
            backend.endpoint(&["reorder"]).as_str(),
            "http://localhost:3000/api/admin/quiz/42/questions/reorder"
        );
        assert_eq!(
            backend.endpoint(&["item", "q-1"]).as_str(),
            "http://localhost:3000/api/admin/quiz/42/questions/item/q-1"
        );
    }

    #[test]
    fn item_ids_are_encoded() {
        let backend = backend("http://localhost:3000", "collection");
        assert_eq!(
            backend.endpoint(&["item", "a/b c"]).as_str(),
            "http://localhost:3000/collection/item/a%2Fb%20c"
        );
    }

    #[test]
    fn invalid_base_url() {
        let err = HttpBackend::new(&Config::new("not a url")).unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }
}
