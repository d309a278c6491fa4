//! Error codes for the inventory and sales API
//!
//! Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Sale errors
//! - 6xxx: Piece / inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Serialized as a plain `u16` so the mobile frontend can match on numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Sale ====================
    /// Sale not found
    SaleNotFound = 4001,
    /// Payment for the sale was already confirmed
    SalePaymentConfirmed = 4002,
    /// Client name missing on sale creation
    SaleClientRequired = 4003,

    // ==================== 6xxx: Piece ====================
    /// Piece not found
    PieceNotFound = 6001,
    /// Piece has invalid price
    PieceInvalidPrice = 6002,
    /// Requested quantity exceeds the stock
    PieceOutOfStock = 6003,
    /// Category path does not exist in the taxonomy
    CategoryNotFound = 6101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Developer-facing English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            ErrorCode::SaleNotFound => "Sale not found",
            ErrorCode::SalePaymentConfirmed => "Sale payment was already confirmed",
            ErrorCode::SaleClientRequired => "Client name is required",

            ErrorCode::PieceNotFound => "Piece not found",
            ErrorCode::PieceInvalidPrice => "Piece has invalid price",
            ErrorCode::PieceOutOfStock => "Not enough pieces in stock",
            ErrorCode::CategoryNotFound => "Category not found",

            ErrorCode::InternalError => "Internal server error",
        }
    }

    /// HTTP status the API answers with for this code
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorCode::Success => 200,
            ErrorCode::NotAuthenticated | ErrorCode::InvalidCredentials | ErrorCode::TokenInvalid => {
                401
            }
            ErrorCode::NotFound
            | ErrorCode::SaleNotFound
            | ErrorCode::PieceNotFound
            | ErrorCode::CategoryNotFound => 404,
            ErrorCode::SalePaymentConfirmed | ErrorCode::PieceOutOfStock => 409,
            ErrorCode::Unknown | ErrorCode::InternalError => 500,
            _ => 400,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),

            4001 => Ok(ErrorCode::SaleNotFound),
            4002 => Ok(ErrorCode::SalePaymentConfirmed),
            4003 => Ok(ErrorCode::SaleClientRequired),

            6001 => Ok(ErrorCode::PieceNotFound),
            6002 => Ok(ErrorCode::PieceInvalidPrice),
            6003 => Ok(ErrorCode::PieceOutOfStock),
            6101 => Ok(ErrorCode::CategoryNotFound),

            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
