//! Status code classification for completed responses.

/// A response status outside the success allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusError {
    /// HTTP 400
    BadRequest,
    /// HTTP 401
    Unauthorized,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 429
    TooManyRequests,
    /// HTTP 503
    ServiceUnavailable,
    /// Any other status, including 2xx codes outside the allow-list and redirects
    Unexpected(u16),
}

impl StatusError {
    /// Returns the numeric status code that produced this error.
    pub fn code(&self) -> u16 {
        match self {
            StatusError::BadRequest => 400,
            StatusError::Unauthorized => 401,
            StatusError::Forbidden => 403,
            StatusError::NotFound => 404,
            StatusError::TooManyRequests => 429,
            StatusError::ServiceUnavailable => 503,
            StatusError::Unexpected(code) => *code,
        }
    }

    /// Whether the remote side signalled a temporary condition worth backing off on.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StatusError::TooManyRequests | StatusError::ServiceUnavailable
        )
    }
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusError::BadRequest => write!(f, "client: bad request (400)"),
            StatusError::Unauthorized => write!(f, "client: unauthorized (401)"),
            StatusError::Forbidden => write!(f, "client: forbidden (403)"),
            StatusError::NotFound => write!(f, "client: not found (404)"),
            StatusError::TooManyRequests => write!(f, "client: too many requests (429)"),
            StatusError::ServiceUnavailable => write!(f, "client: service unavailable (503)"),
            StatusError::Unexpected(code) => {
                write!(f, "client: unexpected status code: {}", code)
            }
        }
    }
}

impl std::error::Error for StatusError {}

/// Maps a numeric status code to a classification outcome.
/// Only 200, 201 and 204 count as success; every other value is an error.
pub fn classify_status(code: u16) -> Result<(), StatusError> {
    match code {
        200 | 201 | 204 => Ok(()),
        400 => Err(StatusError::BadRequest),
        401 => Err(StatusError::Unauthorized),
        403 => Err(StatusError::Forbidden),
        404 => Err(StatusError::NotFound),
        429 => Err(StatusError::TooManyRequests),
        503 => Err(StatusError::ServiceUnavailable),
        other => Err(StatusError::Unexpected(other)),
    }
}
