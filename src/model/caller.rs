//! The identity a request is made under.
//!
//! Every client method that cares about identity takes an explicit `&Caller`. There is no
//! ambient session: the identity provider resolves a [`Caller`] once and the caller passes it
//! along.

use crate::model::{User, UserId};

/// Either nobody, or a resolved user.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    User(User),
}

/// Raised when an operation needs a signed-in caller and got [`Caller::Anonymous`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Not authenticated")]
pub struct Unauthenticated;

impl Caller {
    /// The authentication gate used by every mutating operation.
    pub fn require(&self) -> Result<&User, Unauthenticated> {
        match self {
            Caller::User(user) => Ok(user),
            Caller::Anonymous => Err(Unauthenticated),
        }
    }

    pub fn id(&self) -> Option<UserId> {
        match self {
            Caller::User(user) => Some(user.id),
            Caller::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Caller::Anonymous)
    }
}

impl From<User> for Caller {
    fn from(user: User) -> Self {
        Caller::User(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_caller_is_rejected() {
        let caller = Caller::default();
        assert!(caller.is_anonymous());
        assert_eq!(caller.require(), Err(Unauthenticated));
        assert_eq!(caller.id(), None);
    }

    #[test]
    fn resolved_caller_exposes_user() {
        let caller = Caller::from(User {
            id: UserId(3),
            name: Some("Meera".into()),
            email: None,
            role: None,
        });
        assert_eq!(caller.id(), Some(UserId(3)));
        assert_eq!(caller.require().map(|u| u.id), Ok(UserId(3)));
    }
}
