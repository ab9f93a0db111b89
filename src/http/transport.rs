//! Transport abstraction the dispatcher executes requests through.
//!
//! The transport owns everything below the request/response contract:
//! connections, TLS, timeouts and redirects. Implementations must be safe
//! to share between concurrent callers.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

use super::request::HttpRequest;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns once the status line and headers arrive.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Readable response body stream.
///
/// Dropping the value releases the underlying stream, so every owner
/// releases it exactly once.
#[async_trait]
pub trait ResponseBody: Send {
    /// Returns the next chunk, or `None` once the stream is exhausted.
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>>;

    /// Drains the remaining stream into memory.
    async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        while let Some(chunk) = self.chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer)
    }
}

/// A response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn ResponseBody>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl ResponseBody + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// A body held entirely in memory, yielded as a single chunk.
#[derive(Debug, Default)]
pub struct BufferedBody(Option<Vec<u8>>);

impl BufferedBody {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Some(bytes.into()))
    }
}

#[async_trait]
impl ResponseBody for BufferedBody {
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.0.take())
    }
}
