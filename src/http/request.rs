//! Outgoing request construction.

use anyhow::{Context, Result};
use reqwest::{
    Method, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::collections::HashMap;
use std::fmt;

/// Caller-supplied request headers. Single-valued: the last write for a name wins.
pub type Headers = HashMap<String, String>;

/// The verbs the dispatcher issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    /// Only POST and PUT send a body.
    pub fn carries_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// A fully built request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Builds a request for `verb`, validating the URL and every header.
    ///
    /// The body is attached only for verbs that carry one; for GET and DELETE
    /// it is ignored even when provided.
    pub fn build(verb: Verb, url: &str, body: Option<&[u8]>, headers: &Headers) -> Result<Self> {
        if url.is_empty() {
            anyhow::bail!("URL is empty");
        }
        let url = Url::parse(url).with_context(|| format!("Invalid URL '{}'", url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme '{}' in '{}'", url.scheme(), url);
        }
        if !url.has_host() {
            anyhow::bail!("URL '{}' has no host", url);
        }

        let mut header_map = HeaderMap::with_capacity(headers.len());
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .with_context(|| format!("Invalid header name '{}'", key))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header '{}'", key))?;
            header_map.insert(name, value);
        }

        let body = if verb.carries_body() {
            Some(body.unwrap_or_default().to_vec())
        } else {
            None
        };

        Ok(Self {
            method: verb.method(),
            url,
            headers: header_map,
            body,
        })
    }
}
