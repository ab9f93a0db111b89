//! Request dispatcher: build, execute, classify, read.

use async_trait::async_trait;
use log::debug;

use super::error::Error;
use super::request::{Headers, HttpRequest, Verb};
use super::status::classify_status;
use super::transport::{HttpResponse, Transport};

/// The caller-facing HTTP operations.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Vec<u8>, Error>;
    async fn post(&self, url: &str, body: &[u8], headers: &Headers) -> Result<Vec<u8>, Error>;
    async fn put(&self, url: &str, body: &[u8], headers: &Headers) -> Result<Vec<u8>, Error>;
    async fn delete(&self, url: &str, headers: &Headers) -> Result<Vec<u8>, Error>;
}

/// Issues requests through an injected [`Transport`] and returns the body of
/// successful responses.
///
/// Holds no state between calls; it is as safe to share as its transport.
#[derive(Clone, Debug)]
pub struct Dispatcher<T: Transport> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[tracing::instrument(skip(self, body, headers))]
    async fn perform(
        &self,
        verb: Verb,
        url: &str,
        body: Option<&[u8]>,
        headers: &Headers,
    ) -> Result<Vec<u8>, Error> {
        let request =
            HttpRequest::build(verb, url, body, headers).map_err(|source| Error::Build {
                verb,
                url: url.to_string(),
                source,
            })?;

        debug!("{} {}...", verb, url);

        let HttpResponse {
            status,
            body: mut response_body,
        } = self
            .transport
            .execute(request)
            .await
            .map_err(|source| Error::Request {
                verb,
                url: url.to_string(),
                source,
            })?;

        // response_body is dropped, and so released, on every return below
        if let Err(source) = classify_status(status) {
            debug!("{} {}: {}", verb, url, source);
            return Err(Error::Status {
                verb,
                url: url.to_string(),
                source,
            });
        }

        let bytes = response_body
            .read_to_end()
            .await
            .map_err(|source| Error::Read {
                verb,
                url: url.to_string(),
                source,
            })?;

        debug!("{} {}: {} ({} bytes)", verb, url, status, bytes.len());

        Ok(bytes)
    }
}

#[async_trait]
impl<T: Transport> HttpClient for Dispatcher<T> {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Vec<u8>, Error> {
        self.perform(Verb::Get, url, None, headers).await
    }

    async fn post(&self, url: &str, body: &[u8], headers: &Headers) -> Result<Vec<u8>, Error> {
        self.perform(Verb::Post, url, Some(body), headers).await
    }

    async fn put(&self, url: &str, body: &[u8], headers: &Headers) -> Result<Vec<u8>, Error> {
        self.perform(Verb::Put, url, Some(body), headers).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Vec<u8>, Error> {
        self.perform(Verb::Delete, url, None, headers).await
    }
}
