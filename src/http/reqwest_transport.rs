//! [`Transport`] backed by a `reqwest` client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::trace;
use reqwest::Client;

use super::request::HttpRequest;
use super::transport::{HttpResponse, ResponseBody, Transport};
use crate::config::TransportConfig;

/// Executes requests with a shared reqwest [`Client`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a transport from configuration.
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        Ok(Self::new(config.build_client()?))
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        trace!("sending {} request to {}", method, url);

        let mut builder = self.client.request(method, url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.context("Failed to send request")?;

        trace!("got {} response from {}", response.status(), url);

        Ok(HttpResponse::new(
            response.status().as_u16(),
            ReqwestBody(response),
        ))
    }
}

struct ReqwestBody(reqwest::Response);

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let chunk = self
            .0
            .chunk()
            .await
            .context("Failed to read chunk from response stream")?;
        Ok(chunk.map(|bytes| bytes.to_vec()))
    }
}
