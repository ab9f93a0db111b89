//! HTTP dispatching over an injectable transport.
//!
//! - `request` - request construction from caller input
//! - `transport` - the transport capability and response body stream
//! - `reqwest_transport` - production transport over reqwest
//! - `status` - status code classification
//! - `client` - the dispatcher and its caller-facing trait

mod client;
mod error;
mod request;
mod reqwest_transport;
mod status;
mod transport;

pub use client::{Dispatcher, HttpClient};
pub use error::{Error, Stage};
pub use request::{Headers, HttpRequest, Verb};
pub use reqwest_transport::ReqwestTransport;
pub use status::{StatusError, classify_status};
pub use transport::{BufferedBody, HttpResponse, ResponseBody, Transport};
