//! A thin outbound HTTP client.
//!
//! [`Dispatcher`] issues GET/POST/PUT/DELETE requests through an injected
//! [`Transport`], classifies the response status and returns the body of
//! successful responses. Everything below the request/response contract
//! (connections, TLS, timeouts, redirects) belongs to the transport.

pub mod config;
pub mod http;

pub use config::TransportConfig;
pub use http::{
    Dispatcher, Error, Headers, HttpClient, ReqwestTransport, StatusError, Transport,
    classify_status,
};

/// Builds a dispatcher over a reqwest transport configured from `config`.
pub fn dispatcher(config: &TransportConfig) -> anyhow::Result<Dispatcher<ReqwestTransport>> {
    Ok(Dispatcher::new(ReqwestTransport::from_config(config)?))
}
