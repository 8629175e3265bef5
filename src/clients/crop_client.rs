//! # Crop Client
//!
//! The crop catalog API. Wraps a `StoreClient<Crop>` and turns store failures back into
//! [`CropError`]s.
use crate::config::ANONYMOUS_FARMER;
use crate::crop_actor::{CropAction, CropActionResult, CropError, SaleReceipt};
use crate::model::{Caller, Crop, CropCreate, CropFields, CropFilter, CropId, CropPatch, CropUpdate};
use async_trait::async_trait;
use record_store::{StoreClient, StoreError, TableClient};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the crops table.
#[derive(Clone)]
pub struct CropClient {
    inner: StoreClient<Crop>,
    anonymous_name: Arc<str>,
}

impl CropClient {
    pub fn new(inner: StoreClient<Crop>) -> Self {
        Self {
            inner,
            anonymous_name: Arc::from(ANONYMOUS_FARMER),
        }
    }

    /// Sets the name stored on listings whose farmer has no display name.
    pub fn with_anonymous_name(mut self, name: &str) -> Self {
        self.anonymous_name = Arc::from(name);
        self
    }

    /// Maps a failure on a specific row, keeping the typed id for `NotFound`.
    fn map_row_error(id: CropId, e: StoreError) -> CropError {
        match e {
            StoreError::NotFound(_) => CropError::NotFound(id),
            other => Self::map_error(other),
        }
    }
}

#[async_trait]
impl TableClient<Crop> for CropClient {
    type Error = CropError;

    fn inner(&self) -> &StoreClient<Crop> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_record_error::<CropError>() {
            Ok(typed) => typed,
            Err(other) => CropError::Store(other.to_string()),
        }
    }
}

impl CropClient {
    /// Publishes a new listing owned by the caller.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: CropFields, caller: &Caller) -> Result<CropId, CropError> {
        let farmer = caller.require()?;
        let params = CropCreate {
            farmer_id: farmer.id,
            farmer_name: farmer.display_name(&self.anonymous_name).to_string(),
            fields,
        };
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Full scan in id order. Every `Some` in the filter must match.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: CropFilter) -> Result<Vec<Crop>, CropError> {
        self.scan(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: CropId) -> Result<Option<Crop>, CropError> {
        self.get(id).await
    }

    /// Applies `patch` if the caller owns the listing and returns the stored result.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: CropId,
        patch: CropPatch,
        caller: &Caller,
    ) -> Result<Crop, CropError> {
        let farmer = caller.require()?;
        let update = CropUpdate {
            caller: farmer.id,
            patch,
        };
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| Self::map_row_error(id, e))
    }

    /// Deletes the listing if the caller owns it. Orders placed against it are kept.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: CropId, caller: &Caller) -> Result<(), CropError> {
        let farmer = caller.require()?;
        debug!("Sending request");
        self.inner
            .delete(id, farmer.id)
            .await
            .map_err(|e| Self::map_row_error(id, e))
    }

    /// Counts one view. Anyone may call this.
    #[instrument(skip(self))]
    pub async fn increment_views(&self, id: CropId) -> Result<u64, CropError> {
        match self
            .inner
            .perform_action(id, CropAction::IncrementViews)
            .await
        {
            Ok(CropActionResult::Views(views)) => Ok(views),
            Ok(other) => Err(CropError::Store(format!(
                "IncrementViews answered with {other:?}"
            ))),
            Err(e) => Err(Self::map_row_error(id, e)),
        }
    }

    /// Counts one sale. Called by the orders table while placing an order.
    #[instrument(skip(self))]
    pub async fn record_sale(&self, id: CropId) -> Result<SaleReceipt, CropError> {
        match self.inner.perform_action(id, CropAction::RecordSale).await {
            Ok(CropActionResult::Sale(receipt)) => Ok(receipt),
            Ok(other) => Err(CropError::Store(format!(
                "RecordSale answered with {other:?}"
            ))),
            Err(e) => Err(Self::map_row_error(id, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::crop::fixtures::fields;
    use crate::model::{User, UserId};
    use record_store::mock::{expect_action, expect_create, expect_delete, mock_store, MockStore};

    fn farmer(id: u32, name: Option<&str>) -> Caller {
        Caller::User(User {
            id: UserId(id),
            name: name.map(str::to_string),
            email: None,
            role: None,
        })
    }

    #[tokio::test]
    async fn create_stamps_owner_and_name() {
        let (client, mut receiver) = mock_store::<Crop>(10);
        let crops = CropClient::new(client);

        let task = tokio::spawn(async move {
            crops.create(fields("Okra"), &farmer(4, Some("Asha"))).await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.farmer_id, UserId(4));
        assert_eq!(params.farmer_name, "Asha");
        assert_eq!(params.fields.name, "Okra");
        responder.send(Ok(CropId(1))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), CropId(1));
    }

    #[tokio::test]
    async fn nameless_farmer_gets_fallback_name() {
        let (client, mut receiver) = mock_store::<Crop>(10);
        let crops = CropClient::new(client).with_anonymous_name("Unnamed grower");

        let task = tokio::spawn(async move { crops.create(fields("Okra"), &farmer(4, None)).await });

        let (params, responder) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(params.farmer_name, "Unnamed grower");
        responder.send(Ok(CropId(2))).unwrap();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn anonymous_writes_never_reach_the_store() {
        let (client, mut receiver) = mock_store::<Crop>(10);
        let crops = CropClient::new(client);
        let anonymous = Caller::Anonymous;

        assert_eq!(
            crops.create(fields("Okra"), &anonymous).await,
            Err(CropError::Unauthenticated)
        );
        assert_eq!(
            crops.update(CropId(1), CropPatch::default(), &anonymous).await,
            Err(CropError::Unauthenticated)
        );
        assert_eq!(
            crops.remove(CropId(1), &anonymous).await,
            Err(CropError::Unauthenticated)
        );

        drop(crops);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn remove_sends_caller_id() {
        let (client, mut receiver) = mock_store::<Crop>(10);
        let crops = CropClient::new(client);

        let task = tokio::spawn(async move { crops.remove(CropId(3), &farmer(4, None)).await });

        let (id, caller, responder) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(id, CropId(3));
        assert_eq!(caller, UserId(4));
        responder.send(Ok(())).unwrap();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn increment_views_returns_new_count() {
        let (client, mut receiver) = mock_store::<Crop>(10);
        let crops = CropClient::new(client);

        let task = tokio::spawn(async move { crops.increment_views(CropId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CropId(1));
        assert_eq!(action, CropAction::IncrementViews);
        responder.send(Ok(CropActionResult::Views(7))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn missing_crop_maps_to_typed_not_found() {
        let mut mock = MockStore::<Crop>::new();
        mock.expect_action(CropId(9))
            .return_err(StoreError::NotFound(CropId(9).to_string()));
        let crops = CropClient::new(mock.client());

        assert_eq!(
            crops.record_sale(CropId(9)).await,
            Err(CropError::NotFound(CropId(9)))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_action_result_is_an_error() {
        let mut mock = MockStore::<Crop>::new();
        mock.expect_action(CropId(1))
            .return_ok(CropActionResult::Views(1));
        let crops = CropClient::new(mock.client());

        assert!(matches!(
            crops.record_sale(CropId(1)).await,
            Err(CropError::Store(_))
        ));
    }
}
