use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use std::time::Duration;

use super::{KeyValueStore, Node, Result, SetOptions, StoreError};

#[derive(Deserialize, Debug)]
struct EtcdResponse {
    node: Node,
}

#[derive(Deserialize, Debug)]
struct EtcdErrorBody {
    #[serde(rename = "errorCode")]
    error_code: u32,
    message: String,
    #[serde(default)]
    cause: String,
}

/// Client for the etcd v2 keys API.
///
/// Endpoints are tried in order, moving on only when a connection cannot be
/// established. Requests are never retried once an endpoint has answered.
#[derive(Debug)]
pub struct EtcdClient {
    endpoints: Vec<String>,
    client: Client,
}

impl EtcdClient {
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(StoreError::Unavailable(
                "no etcd endpoints configured".to_string(),
            ));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoints, client })
    }

    /// Each key segment is percent-encoded, so labels holding `#`, `?` or
    /// `%` stay inside their own path segment.
    fn url(endpoint: &str, key: &str) -> Result<Url> {
        let invalid = || StoreError::Unavailable(format!("invalid etcd endpoint: {endpoint}"));
        let mut url = Url::parse(endpoint).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["v2", "keys"])
            .extend(key.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    async fn send<F>(&self, key: &str, build: F) -> Result<Response>
    where
        F: Fn(Url) -> RequestBuilder,
    {
        let mut last_error = None;
        for endpoint in &self.endpoints {
            let url = Self::url(endpoint, key)?;
            match build(url).send().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() => {
                    warn!("etcd endpoint {endpoint} unreachable: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(match last_error {
            Some(e) => e.into(),
            None => StoreError::Unavailable("no etcd endpoint reachable".to_string()),
        })
    }

    async fn handle_response(response: Response) -> Result<Node> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let parsed: EtcdResponse = serde_json::from_str(&body)?;
            return Ok(parsed.node);
        }

        match serde_json::from_str::<EtcdErrorBody>(&body) {
            Ok(err) => Err(StoreError::from_code(err.error_code, err.message, err.cause)),
            Err(_) => Err(StoreError::Unavailable(format!("HTTP {status}: {body}"))),
        }
    }
}

#[async_trait]
impl KeyValueStore for EtcdClient {
    async fn get(&self, key: &str, recursive: bool) -> Result<Node> {
        debug!("etcd get {key} (recursive: {recursive})");
        let response = self
            .send(key, |url| {
                self.client
                    .get(url)
                    .query(&[("recursive", recursive)])
            })
            .await?;
        Self::handle_response(response).await
    }

    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<Node> {
        debug!("etcd set {key}");
        let mut form = vec![("value", value.to_string())];
        if let Some(prev_exist) = options.prev_exist {
            form.push(("prevExist", prev_exist.to_string()));
        }
        let response = self
            .send(key, |url| self.client.put(url).form(&form))
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, key: &str, recursive: bool) -> Result<()> {
        debug!("etcd delete {key} (recursive: {recursive})");
        let response = self
            .send(key, |url| {
                self.client
                    .delete(url)
                    .query(&[("recursive", recursive)])
            })
            .await?;
        Self::handle_response(response).await.map(|_| ())
    }
}
