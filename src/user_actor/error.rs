//! Error types for the users table.

use crate::model::UserId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// The store could not be reached or dropped the reply.
    #[error("User store error: {0}")]
    Store(String),
}
