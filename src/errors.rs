// errors.rs
use std::fmt;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (store, export).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Unauthorized,
    DbError(String),
    XlsxError(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized => write!(f, "Unauthorized"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Export Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
