//! Error codes shared between the inventory API and its clients
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Sale errors
//! - 6xxx: Piece / inventory errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiErrorBody, ErrorCode};
//!
//! let body = ApiErrorBody::new(ErrorCode::PieceNotFound);
//! assert_eq!(body.code, ErrorCode::PieceNotFound);
//! assert_eq!(body.message, "Piece not found");
//! ```

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};

use serde::{Deserialize, Serialize};

/// Error body returned by the API on non-2xx responses
///
/// ```json
/// { "code": 6001, "message": "Piece not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiErrorBody {
    /// Error body with the default message of `code`
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }

    /// Error body with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
