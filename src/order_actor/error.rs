//! Error types for the orders table.

use crate::crop_actor::CropError;
use crate::model::{CropId, OrderId, OrderStatus, Unauthenticated, UserId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The crop being ordered does not exist (or vanished before the sale was counted).
    #[error("Crop not found: {0}")]
    CropNotFound(CropId),

    /// Only the order's farmer may change its status.
    #[error("Not authorized: {caller} is not the farmer for {order}")]
    Forbidden { order: OrderId, caller: UserId },

    /// Rejected by the configured [`TransitionPolicy`](super::TransitionPolicy).
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Orders cannot be deleted: {0}")]
    Permanent(OrderId),

    #[error("Order store error: {0}")]
    Store(String),
}

impl From<Unauthenticated> for OrderError {
    fn from(_: Unauthenticated) -> Self {
        OrderError::Unauthenticated
    }
}

/// Failures reaching the crops table while placing an order.
impl From<CropError> for OrderError {
    fn from(e: CropError) -> Self {
        match e {
            CropError::NotFound(crop) => OrderError::CropNotFound(crop),
            other => OrderError::Store(other.to_string()),
        }
    }
}
