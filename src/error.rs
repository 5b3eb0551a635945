//!
//! # Error Handling
//!
//! This module defines `AppError`, the error type used throughout the
//! application. All fallible core operations return it, and the HTTP layer
//! converts it into responses via `actix_web::error::ResponseError`.
//!
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` allow the `?`
//! operator at the points where those libraries are used. Storage and
//! hashing failures keep their detail for the log but are presented to
//! callers as an opaque internal error.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions the application can surface.
#[derive(Debug)]
pub enum AppError {
    /// Signup attempted with a username that already exists (HTTP 409).
    DuplicateUsername,
    /// Signin failed. Deliberately carries no indication of whether the
    /// username or the password was wrong (HTTP 401).
    InvalidCredentials,
    /// A bearer token that is malformed, unsigned, or tampered with (HTTP 401).
    InvalidToken,
    /// A request with no usable identity: missing token, or valid claims
    /// referencing a user that no longer exists (HTTP 401).
    Unauthenticated,
    /// Task id absent, or owned by a different user. The two cases are
    /// indistinguishable to the caller (HTTP 404).
    TaskNotFound,
    /// Input failed boundary validation (HTTP 422).
    Validation(String),
    /// Anything else. The message is logged server-side and never sent to
    /// the caller (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateUsername => write!(f, "Username already exists"),
            AppError::InvalidCredentials => write!(f, "Please check your credentials"),
            AppError::InvalidToken => write!(f, "Invalid token"),
            AppError::Unauthenticated => write!(f, "Unauthorized"),
            AppError::TaskNotFound => write!(f, "Task not found"),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::DuplicateUsername => HttpResponse::Conflict().json(json!({
                "error": self.to_string()
            })),
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::Unauthenticated => HttpResponse::Unauthorized().json(json!({
                "error": self.to_string()
            })),
            AppError::TaskNotFound => HttpResponse::NotFound().json(json!({
                "error": self.to_string()
            })),
            AppError::Validation(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::TaskNotFound,
            _ => AppError::Internal(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// JWT processing failures all collapse into `InvalidToken`, so a caller
/// cannot tell a malformed token from a tampered one.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("bcrypt failure: {}", error))
    }
}
