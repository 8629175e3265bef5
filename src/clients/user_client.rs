//! # User Client
//!
//! Identity provider API over the users table: sign-up and caller resolution.
use crate::model::{Caller, User, UserCreate, UserId};
use crate::user_actor::UserError;
use async_trait::async_trait;
use record_store::{StoreClient, StoreError, TableClient};
use tracing::{debug, instrument};

/// Client for the users table.
#[derive(Clone)]
pub struct UserClient {
    inner: StoreClient<User>,
}

impl UserClient {
    pub fn new(inner: StoreClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        UserError::Store(e.to_string())
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn sign_up(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Resolves a session's user id into a [`Caller`].
    ///
    /// No id, or an id with no account behind it, resolves to [`Caller::Anonymous`].
    #[instrument(skip(self))]
    pub async fn resolve(&self, id: Option<UserId>) -> Result<Caller, UserError> {
        let Some(id) = id else {
            return Ok(Caller::Anonymous);
        };
        match self.get(id).await? {
            Some(user) => Ok(Caller::User(user)),
            None => {
                debug!(user = %id, "Unknown user, resolving as anonymous");
                Ok(Caller::Anonymous)
            }
        }
    }

    /// Fetches an account that must exist.
    #[instrument(skip(self))]
    pub async fn profile(&self, id: UserId) -> Result<User, UserError> {
        self.get(id).await?.ok_or(UserError::NotFound(id))
    }
}
