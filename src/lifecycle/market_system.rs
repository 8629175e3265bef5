use crate::clients::{CropClient, OrderClient, UserClient};
use crate::config::MarketConfig;
use crate::order_actor::OrderContext;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Owns the three market tables and their clients.
///
/// # Architecture
///
/// - **Users**: the identity provider (Context = `()`)
/// - **Crops**: the catalog and its counters (Context = `()`)
/// - **Orders**: depends on Crops to count sales (Context = [`OrderContext`])
///
/// # Example
///
/// ```rust
/// use farm_market::lifecycle::MarketSystem;
/// use farm_market::model::UserCreate;
///
/// #[tokio::main]
/// async fn main() {
///     let system = MarketSystem::new();
///     let id = system.users.sign_up(UserCreate::new("Asha", "asha@example.com")).await.unwrap();
///     let farmer = system.users.resolve(Some(id)).await.unwrap();
///     assert!(!farmer.is_anonymous());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct MarketSystem {
    pub users: UserClient,
    pub crops: CropClient,
    pub orders: OrderClient,

    /// Store tasks, awaited on shutdown
    handles: Vec<JoinHandle<()>>,
}

impl Default for MarketSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketSystem {
    /// Starts the market with [`MarketConfig::default`]. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(&MarketConfig::default())
    }

    pub fn with_config(config: &MarketConfig) -> Self {
        let capacity = config.channel_capacity;

        // 1. Create stores (no dependencies yet)
        let (user_store, users) = crate::user_actor::new(capacity);
        let (crop_store, crops) = crate::crop_actor::new(capacity);
        let crops = crops.with_anonymous_name(&config.anonymous_farmer_name);
        let (order_store, orders) = crate::order_actor::new(capacity, crops.clone());
        let orders = orders.with_anonymous_name(&config.anonymous_customer_name);

        // 2. Start stores with injected context
        let context = OrderContext {
            crops: crops.clone(),
            transitions: config.status_policy.build(),
        };
        let handles = vec![
            tokio::spawn(user_store.run(())),
            tokio::spawn(crop_store.run(())),
            tokio::spawn(order_store.run(context)),
        ];

        info!(?config, "Market started");
        Self {
            users,
            crops,
            orders,
            handles,
        }
    }

    /// Drops every client and waits for the stores to drain.
    ///
    /// The orders table holds a crops client in its context, so the crops table only closes
    /// once the orders table has exited. The graph is acyclic, so this always terminates.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down market...");

        drop(self.orders);
        drop(self.crops);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(e);
            }
        }

        info!("Market shutdown complete.");
        Ok(())
    }
}
