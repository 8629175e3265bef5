//! Farmer dashboard figures.
//!
//! Everything here is derived on demand from the crop and order tables; nothing is stored.

use crate::clients::{CropClient, OrderClient};
use crate::crop_actor::CropError;
use crate::model::{Caller, CropFilter};
use crate::order_actor::OrderError;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerStats {
    /// Listings owned by the farmer, published or not.
    pub listings: usize,
    pub published: usize,
    pub total_views: u64,
    pub total_sales: u64,
    /// Sum of `totalPrice` over every order for the farmer's crops, whatever its status.
    pub revenue: f64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticsError {
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Computes the dashboard for the calling farmer. Anonymous callers get all zeros.
#[instrument(skip(crops, orders))]
pub async fn farmer_stats(
    crops: &CropClient,
    orders: &OrderClient,
    caller: &Caller,
) -> Result<FarmerStats, AnalyticsError> {
    let Some(farmer) = caller.id() else {
        return Ok(FarmerStats::default());
    };

    let listings = crops.list(CropFilter::default().farmer(farmer)).await?;
    let received = orders.list_by_farmer(caller).await?;

    Ok(FarmerStats {
        listings: listings.len(),
        published: listings.iter().filter(|c| c.published).count(),
        total_views: listings.iter().map(|c| c.views).sum(),
        total_sales: listings.iter().map(|c| c.sales).sum(),
        revenue: received.iter().map(|o| o.total_price).sum(),
    })
}
