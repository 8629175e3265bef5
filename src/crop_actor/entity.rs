//! [`Record`] implementation for [`Crop`].
//!
//! Ownership checks live here, inside the table task, so that the check and the write it
//! guards are one transaction.

use super::{CropAction, CropActionResult, CropError, SaleReceipt};
use crate::model::{Crop, CropCreate, CropFilter, CropId, CropUpdate, UserId};
use async_trait::async_trait;
use record_store::Record;
use tracing::debug;

impl Crop {
    fn ensure_owner(&self, caller: UserId) -> Result<(), CropError> {
        if self.farmer_id != caller {
            return Err(CropError::Forbidden {
                crop: self.id,
                caller,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Record for Crop {
    type Id = CropId;
    type Create = CropCreate;
    type Update = CropUpdate;
    type Filter = CropFilter;
    type Caller = UserId;
    type Action = CropAction;
    type ActionResult = CropActionResult;
    type Context = ();
    type Error = CropError;

    fn from_create_params(id: CropId, params: CropCreate) -> Result<Self, CropError> {
        Ok(Self::new(id, params))
    }

    fn matches(&self, filter: &CropFilter) -> bool {
        filter.matches(self)
    }

    /// Applies the patch if the caller owns the listing.
    ///
    /// `farmerId`, `views` and `sales` are not part of [`CropPatch`](crate::model::CropPatch),
    /// so no patch can touch them.
    async fn on_update(&mut self, update: CropUpdate, _ctx: &()) -> Result<(), CropError> {
        self.ensure_owner(update.caller)?;
        self.apply(update.patch);
        Ok(())
    }

    async fn on_delete(&self, caller: &UserId, _ctx: &()) -> Result<(), CropError> {
        self.ensure_owner(*caller)
    }

    async fn handle_action(
        &mut self,
        action: CropAction,
        _ctx: &(),
    ) -> Result<CropActionResult, CropError> {
        match action {
            CropAction::IncrementViews => {
                self.views += 1;
                debug!(crop = %self.id, views = self.views, "View counted");
                Ok(CropActionResult::Views(self.views))
            }
            CropAction::RecordSale => {
                self.sales += 1;
                debug!(crop = %self.id, sales = self.sales, "Sale counted");
                Ok(CropActionResult::Sale(SaleReceipt {
                    sales: self.sales,
                    price_per_unit: self.price_per_unit,
                }))
            }
        }
    }
}
