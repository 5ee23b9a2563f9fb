use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{StoreError, StoreResult};

/// Thin JSON client for a Firebase-style REST document store.
///
/// Every record lives at `{base_url}/{path}.json`. A `null` body means the
/// record does not exist.
#[derive(Clone, Debug)]
pub struct DocumentClient {
    http: Client,
    base_url: String,
}

/// Body returned by the store for a `POST` to a collection.
#[derive(Debug, Deserialize)]
struct CreatedKey {
    name: String,
}

impl DocumentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> StoreResult<Option<T>> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        response
            .json::<Option<T>>()
            .await
            .map_err(|source| StoreError::Decode {
                path: path.to_string(),
                source,
            })
    }

    /// Appends a record to a collection and returns the generated key.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> StoreResult<String> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        let created = response
            .json::<CreatedKey>()
            .await
            .map_err(|source| StoreError::Decode {
                path: path.to_string(),
                source,
            })?;
        Ok(created.name)
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> StoreResult<()> {
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> StoreResult<()> {
        self.send(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> StoreResult<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> StoreResult<Response> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "store request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| StoreError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_string(),
                status,
            });
        }

        Ok(response)
    }
}
