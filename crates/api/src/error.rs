use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single backend call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),

    /// 401/403 on an authenticated call. The session is no longer usable.
    #[error("Unauthorized or Forbidden")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response.
    #[error("{}", describe_http(*.status, .message.as_deref()))]
    Http { status: u16, message: Option<String> },

    /// A 2xx body that does not have the expected shape.
    #[error("unexpected response from {path}: {reason}")]
    Schema { path: String, reason: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status } | ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Schema { .. } => None,
        }
    }
}

fn describe_http(status: u16, message: Option<&str>) -> String {
    match message {
        Some(msg) => msg.to_string(),
        None => format!("HTTP error! Status: {status}"),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Pull a human message out of a backend error body.
///
/// The backend puts it under `detail` (string, or a list of validation errors)
/// and occasionally under `message`.
pub(crate) fn backend_message(body: &serde_json::Value) -> Option<String> {
    match body.get("detail") {
        Some(serde_json::Value::String(s)) => return Some(s.clone()),
        Some(serde_json::Value::Null) | None => {}
        Some(other) => return Some(other.to_string()),
    }
    body.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
