//! Error types for the crops table.

use crate::model::{CropId, Unauthenticated, UserId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CropError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Crop not found: {0}")]
    NotFound(CropId),

    /// The caller is signed in but does not own the listing.
    #[error("Not authorized: {caller} does not own {crop}")]
    Forbidden { crop: CropId, caller: UserId },

    #[error("Crop store error: {0}")]
    Store(String),
}

impl From<Unauthenticated> for CropError {
    fn from(_: Unauthenticated) -> Self {
        CropError::Unauthenticated
    }
}
