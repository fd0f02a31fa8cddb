/// Error types for VibeTune
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    /// The caller supplied an empty or otherwise unusable description
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The completion provider was unreachable, rejected the request,
    /// or answered with something that does not match the requested shape
    #[error("LLM provider error: {0}")]
    Provider(String),

    /// The response had the right shape but a value outside its allowed set
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for every failure that originates at (or behind) the completion provider.
    ///
    /// Validation failures are grouped here: the provider was asked for a
    /// conforming value and did not deliver one.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, AppError::Provider(_) | AppError::Validation(_))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            e if e.is_provider_failure() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<keyring::Error> for AppError {
    fn from(error: keyring::Error) -> Self {
        AppError::Keychain(error.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON error body for the API routes
///
/// Provider failures are reported generically; the cause goes to the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::InvalidInput(msg) => msg.clone(),
            e if e.is_provider_failure() => {
                log::error!("Recommendation failed: {}", e);
                "Could not get a recommendation from the language model".to_string()
            }
            e => {
                log::error!("Request failed: {}", e);
                "Internal error".to_string()
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
