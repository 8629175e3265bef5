//! [`Record`] implementation for [`User`].
//!
//! Accounts are written once at sign-up. The table accepts no patches and no actions, which the
//! `Infallible` payload types encode directly.

use super::UserError;
use crate::model::{User, UserCreate, UserId};
use async_trait::async_trait;
use record_store::Record;
use std::convert::Infallible;

#[async_trait]
impl Record for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = Infallible;
    type Filter = ();
    type Caller = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
        })
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), UserError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), UserError> {
        match action {}
    }
}
