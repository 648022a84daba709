//! REST client for the hosted backend
//!
//! One `reqwest::Client` is shared by every port implementation; cloning
//! a `BackendClient` is cheap.

mod time_source;
mod waitlist_store;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, header::HeaderMap};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::error::RestError;
use crate::messages::ApiErrorBody;

const REST_PREFIX: &str = "/rest/v1";

/// HTTP client for the hosted backend
/// Infrastructure component - handles HTTP communication
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, RestError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(BackendClient {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call a database function: `POST /rest/v1/rpc/{name}`
    pub async fn rpc<T: DeserializeOwned>(&self, name: &str) -> Result<T, RestError> {
        let resp = self
            .request(Method::POST, &format!("/rpc/{}", name))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        self.handle_response(resp).await
    }

    /// `HEAD` a REST path and return the response headers
    ///
    /// The status is not checked: even an auth failure carries a `Date` header.
    pub async fn head(&self, path: &str, prefer: Option<&str>) -> Result<HeaderMap, RestError> {
        let mut req = self.request(Method::HEAD, path);
        if let Some(prefer) = prefer {
            req = req.header("Prefer", prefer);
        }
        let resp = req.send().await?;
        debug!("HEAD {} -> {}", path, resp.status());
        Ok(resp.headers().clone())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        let resp = self.request(Method::GET, path).send().await?;
        self.handle_response(resp).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, REST_PREFIX, path);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn handle_response<T: DeserializeOwned>(&self, resp: Response) -> Result<T, RestError> {
        let text = Self::check_status(resp).await?;
        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Read the body, turning non-2xx responses into `RestError::Api`
    async fn check_status(resp: Response) -> Result<String, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        let body: Option<ApiErrorBody> = serde_json::from_str(&text).ok();
        let (code, msg) = match body {
            Some(err) => (
                err.code.unwrap_or_else(|| status.as_u16().to_string()),
                err.message.or(err.details).unwrap_or_else(|| status.to_string()),
            ),
            None => (status.as_u16().to_string(), format!("HTTP {}: {}", status, text)),
        };
        Err(RestError::Api { code, msg })
    }
}
