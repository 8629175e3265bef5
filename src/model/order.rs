//! Customer orders placed against crop listings.
//!
//! [`Order`] implements the [`Record`](record_store::Record) trait in
//! [`order_actor::entity`](crate::order_actor::entity).
//!
//! - Creation parameters ([`OrderCreate`])
//! - Update parameters ([`OrderStatusChange`])
//! - Scan parameters ([`OrderFilter`])

use crate::model::{CropId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub crop_id: CropId,
    pub customer_id: UserId,
    pub customer_name: String,
    /// Copied from the crop when the order is placed.
    pub farmer_id: UserId,
    pub quantity: f64,
    /// As submitted by the customer. Not recomputed.
    pub total_price: f64,
    pub status: OrderStatus,
}

/// Payload for inserting an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub crop_id: CropId,
    pub customer_id: UserId,
    pub customer_name: String,
    pub farmer_id: UserId,
    pub quantity: f64,
    pub total_price: f64,
}

/// A status move requested by `caller`.
#[derive(Debug, Clone)]
pub struct OrderStatusChange {
    pub caller: UserId,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub customer_id: Option<UserId>,
    pub farmer_id: Option<UserId>,
}

impl OrderFilter {
    pub fn customer(customer_id: UserId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Default::default()
        }
    }

    pub fn farmer(farmer_id: UserId) -> Self {
        Self {
            farmer_id: Some(farmer_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.customer_id.map_or(true, |c| order.customer_id == c)
            && self.farmer_id.map_or(true, |f| order.farmer_id == f)
    }
}

impl Order {
    /// New orders always start out pending.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            crop_id: params.crop_id,
            customer_id: params.customer_id,
            customer_name: params.customer_name,
            farmer_id: params.farmer_id,
            quantity: params.quantity,
            total_price: params.total_price,
            status: OrderStatus::Pending,
        }
    }
}
