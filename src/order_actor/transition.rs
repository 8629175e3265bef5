//! Order status transition rules.
//!
//! Status changes go through a [`TransitionPolicy`] held in the orders table's context. The
//! default, [`Unrestricted`], lets the farmer move an order between any two states. Deployments
//! that want the usual fulfilment graph select [`Lifecycle`].

use crate::model::OrderStatus;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

pub trait TransitionPolicy: Send + Sync + Debug {
    /// Returns true when an order may move from `from` to `to`.
    fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool;
}

/// Any state to any state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl TransitionPolicy for Unrestricted {
    fn allows(&self, _from: OrderStatus, _to: OrderStatus) -> bool {
        true
    }
}

/// pending → confirmed → delivered, with cancellation allowed until delivery.
///
/// Re-applying the current status is always accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lifecycle;

impl TransitionPolicy for Lifecycle {
    fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        use crate::model::OrderStatus::*;
        from == to
            || matches!(
                (from, to),
                (Pending, Confirmed)
                    | (Confirmed, Delivered)
                    | (Pending, Cancelled)
                    | (Confirmed, Cancelled)
            )
    }
}

/// Configuration-level choice of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    #[default]
    Unrestricted,
    Lifecycle,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for StatusPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unrestricted" => Ok(StatusPolicy::Unrestricted),
            "lifecycle" => Ok(StatusPolicy::Lifecycle),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl StatusPolicy {
    pub fn build(self) -> Arc<dyn TransitionPolicy> {
        match self {
            StatusPolicy::Unrestricted => Arc::new(Unrestricted),
            StatusPolicy::Lifecycle => Arc::new(Lifecycle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus::*;

    const ALL: [OrderStatus; 4] = [Pending, Confirmed, Delivered, Cancelled];

    #[test]
    fn unrestricted_allows_everything() {
        for from in ALL {
            for to in ALL {
                assert!(Unrestricted.allows(from, to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn lifecycle_follows_fulfilment_graph() {
        assert!(Lifecycle.allows(Pending, Confirmed));
        assert!(Lifecycle.allows(Confirmed, Delivered));
        assert!(Lifecycle.allows(Confirmed, Cancelled));
        assert!(Lifecycle.allows(Delivered, Delivered));

        assert!(!Lifecycle.allows(Pending, Delivered));
        assert!(!Lifecycle.allows(Delivered, Pending));
        assert!(!Lifecycle.allows(Cancelled, Confirmed));
        assert!(!Lifecycle.allows(Delivered, Cancelled));
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("lifecycle".parse::<StatusPolicy>(), Ok(StatusPolicy::Lifecycle));
        assert_eq!(" Unrestricted ".parse::<StatusPolicy>(), Ok(StatusPolicy::Unrestricted));
        assert!("strict".parse::<StatusPolicy>().is_err());
    }
}
