use async_trait::async_trait;
use record_store::{Record, RecordStore, StoreError};

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Listing {
    id: u32,
    owner: u32,
    title: String,
    hits: u64,
}

#[derive(Debug)]
struct ListingCreate {
    owner: u32,
    title: String,
}

#[derive(Debug)]
struct Retitle {
    caller: u32,
    title: String,
}

#[derive(Debug, Default)]
struct ListingFilter {
    owner: Option<u32>,
}

#[derive(Debug)]
enum ListingAction {
    Hit,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum ListingError {
    #[error("caller {0} does not own this listing")]
    NotOwner(u32),
    #[error("empty title")]
    EmptyTitle,
}

#[async_trait]
impl Record for Listing {
    type Id = u32;
    type Create = ListingCreate;
    type Update = Retitle;
    type Filter = ListingFilter;
    type Caller = u32;
    type Action = ListingAction;
    type ActionResult = u64;
    type Context = ();
    type Error = ListingError;

    fn from_create_params(id: u32, params: ListingCreate) -> Result<Self, ListingError> {
        if params.title.is_empty() {
            return Err(ListingError::EmptyTitle);
        }
        Ok(Self {
            id,
            owner: params.owner,
            title: params.title,
            hits: 0,
        })
    }

    fn matches(&self, filter: &ListingFilter) -> bool {
        filter.owner.map_or(true, |owner| owner == self.owner)
    }

    async fn on_update(&mut self, update: Retitle, _ctx: &()) -> Result<(), ListingError> {
        // Mutate first, then reject: the store must discard the draft.
        self.title = update.title;
        if update.caller != self.owner {
            return Err(ListingError::NotOwner(update.caller));
        }
        Ok(())
    }

    async fn on_delete(&self, caller: &u32, _ctx: &()) -> Result<(), ListingError> {
        if *caller != self.owner {
            return Err(ListingError::NotOwner(*caller));
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ListingAction, _ctx: &()) -> Result<u64, ListingError> {
        match action {
            ListingAction::Hit => {
                self.hits += 1;
                Ok(self.hits)
            }
        }
    }
}

fn listing(owner: u32, title: &str) -> ListingCreate {
    ListingCreate {
        owner,
        title: title.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (store, client) = RecordStore::<Listing>::new(10);
    tokio::spawn(store.run(()));

    let id = client.create(listing(7, "Basmati rice")).await.unwrap();
    assert_eq!(id, 1);

    assert_eq!(client.perform_action(id, ListingAction::Hit).await.unwrap(), 1);
    assert_eq!(client.perform_action(id, ListingAction::Hit).await.unwrap(), 2);

    let updated = client
        .update(
            id,
            Retitle {
                caller: 7,
                title: "Brown rice".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Brown rice");
    assert_eq!(updated.hits, 2);

    client.delete(id, 7).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_update_leaves_row_untouched() {
    let (store, client) = RecordStore::<Listing>::new(10);
    tokio::spawn(store.run(()));

    let id = client.create(listing(7, "Mangoes")).await.unwrap();
    let err = client
        .update(
            id,
            Retitle {
                caller: 8,
                title: "Stolen".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.into_record_error::<ListingError>().unwrap(),
        ListingError::NotOwner(8)
    );
    assert_eq!(client.get(id).await.unwrap().unwrap().title, "Mangoes");
}

#[tokio::test]
async fn test_rejected_delete_keeps_row() {
    let (store, client) = RecordStore::<Listing>::new(10);
    tokio::spawn(store.run(()));

    let id = client.create(listing(1, "Lentils")).await.unwrap();
    assert!(client.delete(id, 2).await.is_err());
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_missing_rows_report_not_found() {
    let (store, client) = RecordStore::<Listing>::new(10);
    tokio::spawn(store.run(()));

    assert!(client.get(42).await.unwrap().is_none());
    assert!(matches!(
        client.perform_action(42, ListingAction::Hit).await,
        Err(StoreError::NotFound(id)) if id == "42"
    ));
    assert!(matches!(
        client.delete(42, 1).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_filters_in_id_order() {
    let (store, client) = RecordStore::<Listing>::new(10);
    tokio::spawn(store.run(()));

    for (owner, title) in [(1, "a"), (2, "b"), (1, "c"), (3, "d"), (1, "e")] {
        client.create(listing(owner, title)).await.unwrap();
    }

    let all = client.list(ListingFilter::default()).await.unwrap();
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|pair| pair[0].id < pair[1].id));

    let titles: Vec<String> = client
        .list(ListingFilter { owner: Some(1) })
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();
    assert_eq!(titles, vec!["a", "c", "e"]);
}

#[tokio::test]
async fn test_failed_create_does_not_consume_id() {
    let (store, client) = RecordStore::<Listing>::new(10);
    tokio::spawn(store.run(()));

    assert!(client.create(listing(1, "")).await.is_err());
    assert_eq!(client.create(listing(1, "Wheat")).await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let (store, client) = RecordStore::<Listing>::new(4);
    tokio::spawn(store.run(()));

    let id = client.create(listing(1, "Tomatoes")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, ListingAction::Hit).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.get(id).await.unwrap().unwrap().hits, 50);
}

#[tokio::test]
async fn test_closed_store_is_reported() {
    let (store, client) = RecordStore::<Listing>::new(1);
    drop(store);

    assert!(matches!(
        client.get(1).await,
        Err(StoreError::StoreClosed)
    ));
}
