//! [ArrClient] implementation talking to a live instance over HTTP.

use crate::models::{CustomFormat, QualityProfile};
use crate::{ArrClient, TransportError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use cfsync_common::Instance;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "X-Api-Key";
const API_ROOT: &str = "api/v3";

/// A client for the v3 API of one Radarr or Sonarr instance. Every request carries the
/// instance's API key.
#[derive(Clone)]
pub struct HttpArrClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArrClient {
    /// Create a new [HttpArrClient] for the given [Instance]. Requests taking longer than
    /// `timeout` fail with a [TransportError::Request].
    pub fn new(instance: &Instance, timeout: Duration) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(&instance.api_key)
            .with_context(|| format!("The API key of {} is not a valid header.", instance.name))?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .with_context(|| format!("Failed to build the HTTP client for {}.", instance.name))?;

        Ok(HttpArrClient {
            client,
            base_url: instance.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_ROOT, resource)
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str) -> Result<T, TransportError> {
        let url = self.url(resource);
        let request = self.client.get(&url);
        Self::execute(request, Method::GET, url).await
    }

    async fn send_json<T, B>(
        &self,
        method: Method,
        resource: &str,
        body: &B,
    ) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(resource);
        let request = self.client.request(method.clone(), &url).json(body);
        Self::execute(request, method, url).await
    }

    async fn execute<T: DeserializeOwned>(
        request: RequestBuilder,
        method: Method,
        url: String,
    ) -> Result<T, TransportError> {
        debug!(method = %method, url = %url, "Sending request.");
        let response = match request.send().await {
            Ok(r) => r,
            Err(source) => {
                return Err(TransportError::Request {
                    method,
                    url,
                    source,
                })
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Could not read the response body."));
            return Err(TransportError::Status {
                method,
                url,
                status: status.as_u16(),
                body,
            });
        }

        match response.json::<T>().await {
            Ok(value) => Ok(value),
            Err(source) => Err(TransportError::Decode {
                method,
                url,
                source,
            }),
        }
    }
}

#[async_trait]
impl ArrClient for HttpArrClient {
    async fn list_custom_formats(&self) -> Result<Vec<CustomFormat>, TransportError> {
        self.get("customformat").await
    }

    async fn upsert_custom_format(
        &self,
        custom_format: &CustomFormat,
    ) -> Result<CustomFormat, TransportError> {
        debug!(payload = ?custom_format, "Sending custom format.");
        match custom_format.id {
            Some(id) => {
                self.send_json(Method::PUT, &format!("customformat/{}", id), custom_format)
                    .await
            }
            None => {
                self.send_json(Method::POST, "customformat", custom_format)
                    .await
            }
        }
    }

    async fn list_quality_profiles(&self) -> Result<Vec<QualityProfile>, TransportError> {
        self.get("qualityprofile").await
    }

    async fn update_quality_profile(
        &self,
        profile: &QualityProfile,
    ) -> Result<QualityProfile, TransportError> {
        self.send_json(
            Method::PUT,
            &format!("qualityprofile/{}", profile.id),
            profile,
        )
        .await
    }
}
