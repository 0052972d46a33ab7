use std::error::Error;
use std::fmt;

/// Failure classification for a single backend call.
///
/// One variant per branch of the error taxonomy: configuration faults are
/// detected before any network traffic, transport faults come from the HTTP
/// layer, and status/backend faults come from the response itself.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unusable credential, reported before any network call.
    Config(String),
    /// The request exceeded its timeout budget. Carries the full
    /// user-facing message since the hint differs per route.
    Timeout(String),
    /// Connection-level failure other than a timeout.
    Transport(String),
    /// Non-2xx HTTP status. The message is extracted from a JSON `error`
    /// field when present, else the raw body text.
    Status { code: u16, message: String },
    /// A 2xx response whose body signals failure (`success: false` or an
    /// explicit `error` key), or a body that could not be interpreted.
    Backend(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(message) => write!(f, "Configuration error: {message}"),
            Self::Timeout(message) => write!(f, "Error: {message}"),
            Self::Transport(message) => write!(f, "Error: Request failed: {message}"),
            Self::Status { code, message } => {
                write!(f, "Error: API returned status {code}: {message}")
            }
            Self::Backend(message) => write!(f, "Error: {message}"),
        }
    }
}

impl Error for ApiError {}

/// Error type for control-plane operations.
#[derive(Debug)]
pub enum ControlError {
    /// Malformed tool input, reported before any network call.
    Validation(String),
    /// A fault from the backend call itself.
    Api(ApiError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "Error: {message}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControlError {}

impl From<ApiError> for ControlError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}
