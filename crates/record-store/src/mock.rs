//! # Mock Stores
//!
//! `MockStore<T>` answers requests from a queue of scripted replies instead of real rows. Use it
//! to test a table whose hooks call a neighbouring table, or a client wrapper, without running
//! the neighbour.
//!
//! | | MockStore | RecordStore |
//! |---|---|---|
//! | **State** | none, scripted replies | real rows |
//! | **Determinism** | total | subject to the scheduler |
//! | **Error injection** | `return_err` | needs crafted state |
//!
//! ```rust
//! use record_store::mock::MockStore;
//! use record_store::{Record, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Tag { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! #[async_trait]
//! impl Record for Tag {
//!     type Id = u32; type Create = (); type Update = (); type Filter = (); type Caller = ();
//!     type Action = (); type ActionResult = (); type Context = (); type Error = TagError;
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Tag>::new();
//!     mock.expect_get(7).return_err(StoreError::StoreClosed);
//!
//!     let result = mock.client().get(7).await;
//!     assert!(matches!(result, Err(StoreError::StoreClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For finer control, [`mock_store`] hands back the raw request receiver and the `expect_*`
//! helpers pull individual requests off it.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::{Reply, StoreRequest};
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted reply, queued in the order requests are expected.
enum Expectation<T: Record> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A fake table driven by queued expectations.
///
/// Requests must arrive in the order their expectations were queued, and ids must match.
/// A mismatch panics inside the mock task, which the caller observes as
/// [`StoreError::StoreDropped`].
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a mock with an empty expectation queue. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("expectation queue poisoned").pop_front();
                answer(request, next);
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("expectation queue poisoned").len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }
}

/// Completes one expectation with a success or an error.
pub struct ExpectationBuilder<T: Record, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .expect("expectation queue poisoned")
            .push_back(expectation);
    }
}

fn answer<T: Record>(request: StoreRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (StoreRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            assert_id(&id, &want);
            let _ = respond_to.send(response);
        }
        (StoreRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (
            StoreRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => {
            assert_id(&id, &want);
            let _ = respond_to.send(response);
        }
        (
            StoreRequest::Delete { id, respond_to, .. },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            assert_id(&id, &want);
            let _ = respond_to.send(response);
        }
        (
            StoreRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            assert_id(&id, &want);
            let _ = respond_to.send(response);
        }
        (request, _) => panic!("Unexpected request or expectation mismatch: {request:?}"),
    }
}

fn assert_id<Id: PartialEq + std::fmt::Display>(got: &Id, want: &Id) {
    if got != want {
        panic!("Expected request for {want}, got {got}");
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client plus the receiver its requests land on.
///
/// Useful when a test wants to inspect the request payload itself before replying.
pub fn mock_store<T: Record>(capacity: usize) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (StoreClient::new(sender), receiver)
}

/// Takes the next request if it is a Create.
pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, Reply<T::Id>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is an Update.
pub async fn expect_update<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Update, Reply<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is a Delete.
pub async fn expect_delete<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Caller, Reply<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete {
            id,
            caller,
            respond_to,
        }) => Some((id, caller, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is a List.
pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Filter, Reply<Vec<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is an Action.
pub async fn expect_action<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Action, Reply<T::ActionResult>)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Plot {
        id: u32,
        acres: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("plot error")]
    struct PlotError;

    #[async_trait]
    impl Record for Plot {
        type Id = u32;
        type Create = u32;
        type Update = u32;
        type Filter = ();
        type Caller = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = PlotError;

        fn from_create_params(id: u32, acres: u32) -> Result<Self, PlotError> {
            Ok(Self { id, acres })
        }
        fn matches(&self, _: &()) -> bool {
            true
        }
        async fn on_update(&mut self, acres: u32, _: &()) -> Result<(), PlotError> {
            self.acres = acres;
            Ok(())
        }
        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), PlotError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn raw_receiver_sees_create_payload() {
        let (client, mut receiver) = mock_store::<Plot>(4);

        let create = tokio::spawn(async move { client.create(12).await });

        let (acres, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(acres, 12);
        responder.send(Ok(3)).unwrap();

        assert!(matches!(create.await.unwrap(), Ok(3)));
    }

    #[tokio::test]
    async fn scripted_replies_are_served_in_order() {
        let mut mock = MockStore::<Plot>::new();
        mock.expect_create().return_ok(1);
        mock.expect_list()
            .return_ok(vec![Plot { id: 1, acres: 4 }]);
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        assert_eq!(client.create(4).await.unwrap(), 1);
        assert_eq!(client.list(()).await.unwrap(), vec![Plot { id: 1, acres: 4 }]);
        assert!(client.get(1).await.unwrap().is_none());

        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_id_surfaces_as_dropped_reply() {
        let mut mock = MockStore::<Plot>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(StoreError::StoreDropped)));
    }
}
