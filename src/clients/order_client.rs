//! # Order Client
//!
//! The order API. Placement looks the crop up first so the order can carry the crop's farmer;
//! the orders table then counts the sale from its `on_create` hook.
use crate::clients::CropClient;
use crate::config::ANONYMOUS_CUSTOMER;
use crate::model::{
    Caller, CropId, Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderStatusChange,
};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use record_store::{StoreClient, StoreError, TableClient};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Client for the orders table.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<Order>,
    crops: CropClient,
    anonymous_name: Arc<str>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<Order>, crops: CropClient) -> Self {
        Self {
            inner,
            crops,
            anonymous_name: Arc::from(ANONYMOUS_CUSTOMER),
        }
    }

    /// Sets the name stored on orders whose customer has no display name.
    pub fn with_anonymous_name(mut self, name: &str) -> Self {
        self.anonymous_name = Arc::from(name);
        self
    }
}

#[async_trait]
impl TableClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_record_error::<OrderError>() {
            Ok(typed) => typed,
            Err(other) => OrderError::Store(other.to_string()),
        }
    }
}

impl OrderClient {
    /// Places an order for `quantity` units of a crop.
    ///
    /// `total_price` is stored as submitted. The crop's `sales` counter goes up by one; its
    /// `quantity` is left alone.
    #[instrument(skip(self, caller))]
    pub async fn create(
        &self,
        crop_id: CropId,
        quantity: f64,
        total_price: f64,
        caller: &Caller,
    ) -> Result<OrderId, OrderError> {
        let customer = caller.require()?;
        let crop = self
            .crops
            .get_by_id(crop_id)
            .await?
            .ok_or(OrderError::CropNotFound(crop_id))?;

        let params = OrderCreate {
            crop_id,
            customer_id: customer.id,
            customer_name: customer.display_name(&self.anonymous_name).to_string(),
            farmer_id: crop.farmer_id,
            quantity,
            total_price,
        };
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order = %id, crop = %crop_id, "Order placed");
        Ok(id)
    }

    /// Orders the caller placed. Anonymous callers see none.
    #[instrument(skip(self))]
    pub async fn list_by_customer(&self, caller: &Caller) -> Result<Vec<Order>, OrderError> {
        match caller.id() {
            Some(id) => self.scan(OrderFilter::customer(id)).await,
            None => Ok(Vec::new()),
        }
    }

    /// Orders placed against the caller's crops. Anonymous callers see none.
    #[instrument(skip(self))]
    pub async fn list_by_farmer(&self, caller: &Caller) -> Result<Vec<Order>, OrderError> {
        match caller.id() {
            Some(id) => self.scan(OrderFilter::farmer(id)).await,
            None => Ok(Vec::new()),
        }
    }

    /// Moves an order to `status`. Only the order's farmer may do this.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        caller: &Caller,
    ) -> Result<Order, OrderError> {
        let farmer = caller.require()?;
        let change = OrderStatusChange {
            caller: farmer.id,
            status,
        };
        debug!("Sending request");
        self.inner.update(id, change).await.map_err(|e| match e {
            StoreError::NotFound(_) => OrderError::NotFound(id),
            other => Self::map_error(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::crop::fixtures::crop;
    use crate::model::{Crop, User, UserId};
    use record_store::mock::{expect_create, expect_update, mock_store, MockStore};

    fn customer(id: u32, name: Option<&str>) -> Caller {
        Caller::User(User {
            id: UserId(id),
            name: name.map(str::to_string),
            email: None,
            role: None,
        })
    }

    #[tokio::test]
    async fn create_copies_farmer_from_crop() {
        let mut crop_mock = MockStore::<Crop>::new();
        crop_mock.expect_get(CropId(1)).return_ok(Some(crop(1, 9)));
        let (client, mut receiver) = mock_store::<Order>(10);
        let orders = OrderClient::new(client, CropClient::new(crop_mock.client()));

        let task = tokio::spawn(async move {
            orders
                .create(CropId(1), 3.0, 150.0, &customer(2, None))
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.farmer_id, UserId(9));
        assert_eq!(params.customer_id, UserId(2));
        assert_eq!(params.customer_name, "Anonymous Customer");
        assert_eq!(params.total_price, 150.0);
        responder.send(Ok(OrderId(1))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), OrderId(1));
        crop_mock.verify();
    }

    #[tokio::test]
    async fn unknown_crop_is_rejected_before_insert() {
        let mut crop_mock = MockStore::<Crop>::new();
        crop_mock.expect_get(CropId(4)).return_ok(None);
        let (client, _receiver) = mock_store::<Order>(10);
        let orders = OrderClient::new(client, CropClient::new(crop_mock.client()));

        assert_eq!(
            orders.create(CropId(4), 1.0, 10.0, &customer(2, Some("Ravi"))).await,
            Err(OrderError::CropNotFound(CropId(4)))
        );
    }

    #[tokio::test]
    async fn anonymous_listings_are_empty() {
        let (client, _receiver) = mock_store::<Order>(10);
        let (crops, _crop_requests) = mock_store::<Crop>(10);
        let orders = OrderClient::new(client, CropClient::new(crops));

        assert!(orders.list_by_customer(&Caller::Anonymous).await.unwrap().is_empty());
        assert!(orders.list_by_farmer(&Caller::Anonymous).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_status_sends_caller_and_maps_not_found() {
        let (client, mut receiver) = mock_store::<Order>(10);
        let (crops, _crop_requests) = mock_store::<Crop>(10);
        let orders = OrderClient::new(client, CropClient::new(crops));

        let task = tokio::spawn(async move {
            orders
                .update_status(OrderId(5), OrderStatus::Confirmed, &customer(9, None))
                .await
        });

        let (id, change, responder) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(id, OrderId(5));
        assert_eq!(change.caller, UserId(9));
        assert_eq!(change.status, OrderStatus::Confirmed);
        responder
            .send(Err(StoreError::NotFound(OrderId(5).to_string())))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(OrderError::NotFound(OrderId(5))));
    }
}
