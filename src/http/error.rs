//! Errors returned by the dispatcher.

use std::error::Error as StdError;
use std::fmt;

use super::request::Verb;
use super::status::StatusError;

/// The step of a call at which it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Build,
    Request,
    Status,
    Read,
}

/// A failed dispatcher call. Every variant records the verb and URL.
#[derive(Debug)]
pub enum Error {
    /// The request could not be built (bad URL or header). Caller bug; do not retry.
    Build {
        verb: Verb,
        url: String,
        source: anyhow::Error,
    },
    /// The transport failed before a response arrived.
    Request {
        verb: Verb,
        url: String,
        source: anyhow::Error,
    },
    /// The remote service answered with a status outside the success allow-list.
    Status {
        verb: Verb,
        url: String,
        source: StatusError,
    },
    /// The status was successful but the body could not be fully read.
    Read {
        verb: Verb,
        url: String,
        source: anyhow::Error,
    },
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Build { .. } => Stage::Build,
            Error::Request { .. } => Stage::Request,
            Error::Status { .. } => Stage::Status,
            Error::Read { .. } => Stage::Read,
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Error::Build { verb, .. }
            | Error::Request { verb, .. }
            | Error::Status { verb, .. }
            | Error::Read { verb, .. } => *verb,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Error::Build { url, .. }
            | Error::Request { url, .. }
            | Error::Status { url, .. }
            | Error::Read { url, .. } => url,
        }
    }

    /// Returns the classification failure, if the call got that far.
    pub fn status(&self) -> Option<&StatusError> {
        match self {
            Error::Status { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether a caller may reasonably try the same call again later.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Build { .. } => false,
            Error::Request { .. } | Error::Read { .. } => true,
            Error::Status { source, .. } => source.is_transient(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Build { verb, url, source } => {
                write!(
                    f,
                    "client: could not create {} request for {}: {:#}",
                    verb, url, source
                )
            }
            Error::Request { verb, url, source } => {
                write!(
                    f,
                    "client: failed to perform {} request to {}: {:#}",
                    verb, url, source
                )
            }
            Error::Status { verb, url, source } => {
                write!(f, "{} {} rejected: {}", verb, url, source)
            }
            Error::Read { verb, url, source } => {
                write!(
                    f,
                    "client: could not read {} response body from {}: {:#}",
                    verb, url, source
                )
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Build { source, .. }
            | Error::Request { source, .. }
            | Error::Read { source, .. } => Some(&**source),
            Error::Status { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_error() -> Error {
        Error::Request {
            verb: Verb::Put,
            url: "http://localhost:1".to_string(),
            source: anyhow::anyhow!("connection refused"),
        }
    }

    #[test]
    fn test_error_display_includes_context_and_cause() {
        let err = request_error();
        let msg = err.to_string();
        assert!(msg.contains("PUT"));
        assert!(msg.contains("http://localhost:1"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_error_source_exposes_cause() {
        let err = request_error();
        assert_eq!(err.source().unwrap().to_string(), "connection refused");

        let err = Error::Status {
            verb: Verb::Get,
            url: "https://example.com".to_string(),
            source: StatusError::NotFound,
        };
        let source = err.source().unwrap();
        assert_eq!(
            source.downcast_ref::<StatusError>(),
            Some(&StatusError::NotFound)
        );
    }

    #[test]
    fn test_error_accessors() {
        let err = Error::Status {
            verb: Verb::Post,
            url: "https://example.com/items".to_string(),
            source: StatusError::TooManyRequests,
        };
        assert_eq!(err.stage(), Stage::Status);
        assert_eq!(err.verb(), Verb::Post);
        assert_eq!(err.url(), "https://example.com/items");
        assert_eq!(err.status(), Some(&StatusError::TooManyRequests));
        assert!(err.to_string().contains("too many requests"));

        assert_eq!(request_error().status(), None);
    }

    #[test]
    fn test_error_is_transient() {
        assert!(request_error().is_transient());

        let build = Error::Build {
            verb: Verb::Get,
            url: String::new(),
            source: anyhow::anyhow!("URL is empty"),
        };
        assert!(!build.is_transient());

        let unauthorized = Error::Status {
            verb: Verb::Get,
            url: "https://example.com".to_string(),
            source: StatusError::Unauthorized,
        };
        assert!(!unauthorized.is_transient());

        let unavailable = Error::Status {
            verb: Verb::Get,
            url: "https://example.com".to_string(),
            source: StatusError::ServiceUnavailable,
        };
        assert!(unavailable.is_transient());
    }
}
