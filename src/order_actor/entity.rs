//! [`Record`] implementation for [`Order`].
//!
//! Placing an order touches two tables. The orders table counts the sale on the crop from its
//! `on_create` hook, before the order row is inserted, so an order is stored only if its sale
//! was recorded. The crops table never calls back into orders.

use super::{OrderContext, OrderError};
use crate::model::{Order, OrderCreate, OrderFilter, OrderId, OrderStatusChange, UserId};
use async_trait::async_trait;
use record_store::Record;
use std::convert::Infallible;
use tracing::{info, warn};

/// Totals closer than this to `quantity * pricePerUnit` are not reported.
const PRICE_TOLERANCE: f64 = 1e-6;

#[async_trait]
impl Record for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderStatusChange;
    type Filter = OrderFilter;
    type Caller = UserId;
    type Action = Infallible;
    type ActionResult = ();
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self::new(id, params))
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.matches(self)
    }

    /// Counts the sale on the crop.
    ///
    /// The submitted total is kept as is. A mismatch with the crop's current price is only
    /// logged.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let receipt = ctx.crops.record_sale(self.crop_id).await?;

        let expected = self.quantity * receipt.price_per_unit;
        if (expected - self.total_price).abs() > PRICE_TOLERANCE {
            warn!(
                order = %self.id,
                crop = %self.crop_id,
                total_price = self.total_price,
                expected,
                "Submitted total does not match quantity x price per unit"
            );
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        change: OrderStatusChange,
        ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        if change.caller != self.farmer_id {
            return Err(OrderError::Forbidden {
                order: self.id,
                caller: change.caller,
            });
        }
        if !ctx.transitions.allows(self.status, change.status) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: change.status,
            });
        }
        info!(order = %self.id, from = %self.status, to = %change.status, "Status changed");
        self.status = change.status;
        Ok(())
    }

    async fn on_delete(&self, _caller: &UserId, _ctx: &OrderContext) -> Result<(), OrderError> {
        Err(OrderError::Permanent(self.id))
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        match action {}
    }
}
