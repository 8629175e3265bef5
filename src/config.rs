//! Configuration options for the market services

use crate::order_actor::StatusPolicy;
use tracing::warn;

/// Name copied onto listings whose farmer has no display name.
pub const ANONYMOUS_FARMER: &str = "Anonymous Farmer";

/// Name copied onto orders whose customer has no display name.
pub const ANONYMOUS_CUSTOMER: &str = "Anonymous Customer";

pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

pub const CHANNEL_CAPACITY_ENV: &str = "FARM_MARKET_CHANNEL_CAPACITY";
pub const STATUS_POLICY_ENV: &str = "FARM_MARKET_STATUS_POLICY";

/// Configuration options for a [`MarketSystem`](crate::lifecycle::MarketSystem)
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Request buffer of each table
    pub channel_capacity: usize,

    /// Fallback farmer name
    pub anonymous_farmer_name: String,

    /// Fallback customer name
    pub anonymous_customer_name: String,

    /// Which order status moves are allowed
    pub status_policy: StatusPolicy,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            anonymous_farmer_name: ANONYMOUS_FARMER.to_string(),
            anonymous_customer_name: ANONYMOUS_CUSTOMER.to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl MarketConfig {
    /// Set the request buffer of each table. Zero is raised to one.
    pub fn with_channel_capacity(mut self, value: usize) -> Self {
        self.channel_capacity = value.max(1);
        self
    }

    /// Set the fallback farmer name
    pub fn with_anonymous_farmer_name(mut self, value: &str) -> Self {
        self.anonymous_farmer_name = value.to_string();
        self
    }

    /// Set the fallback customer name
    pub fn with_anonymous_customer_name(mut self, value: &str) -> Self {
        self.anonymous_customer_name = value.to_string();
        self
    }

    /// Set the order status policy
    pub fn with_status_policy(mut self, value: StatusPolicy) -> Self {
        self.status_policy = value;
        self
    }

    /// Defaults overridden by `FARM_MARKET_*` environment variables.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CHANNEL_CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.channel_capacity = capacity,
                _ => warn!(var = CHANNEL_CAPACITY_ENV, value = %raw, "Ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(STATUS_POLICY_ENV) {
            match raw.parse::<StatusPolicy>() {
                Ok(policy) => config.status_policy = policy,
                Err(e) => warn!(var = STATUS_POLICY_ENV, error = %e, "Ignoring invalid value"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_stored_fallbacks() {
        let config = MarketConfig::default();
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.anonymous_farmer_name, "Anonymous Farmer");
        assert_eq!(config.anonymous_customer_name, "Anonymous Customer");
        assert_eq!(config.status_policy, StatusPolicy::Unrestricted);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = MarketConfig::from_lookup(lookup(&[
            (CHANNEL_CAPACITY_ENV, "8"),
            (STATUS_POLICY_ENV, "lifecycle"),
        ]));
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.status_policy, StatusPolicy::Lifecycle);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = MarketConfig::from_lookup(lookup(&[
            (CHANNEL_CAPACITY_ENV, "0"),
            (STATUS_POLICY_ENV, "strict"),
        ]));
        assert_eq!(config, MarketConfig::default());
    }

    #[test]
    fn builders_chain() {
        let config = MarketConfig::default()
            .with_channel_capacity(0)
            .with_anonymous_farmer_name("Kisan")
            .with_status_policy(StatusPolicy::Lifecycle);
        assert_eq!(config.channel_capacity, 1);
        assert_eq!(config.anonymous_farmer_name, "Kisan");
        assert_eq!(config.status_policy, StatusPolicy::Lifecycle);
    }
}
