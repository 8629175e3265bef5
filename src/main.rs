//! # Farm Market demo
//!
//! Drives the market end to end:
//! 1.  Starting the [`MarketSystem`] from the environment's [`MarketConfig`].
//! 2.  Signing up a farmer and a customer.
//! 3.  Listing a crop, viewing it and ordering it.
//! 4.  Confirming the order and printing the farmer's dashboard.

use farm_market::analytics::farmer_stats;
use farm_market::config::MarketConfig;
use farm_market::lifecycle::{setup_tracing, MarketSystem};
use farm_market::model::{CropFields, CropFilter, CropType, Location, OrderStatus, Role, Unit, UserCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = MarketConfig::from_env();
    info!("Starting farm market");
    let system = MarketSystem::with_config(&config);

    let farmer_id = system
        .users
        .sign_up(UserCreate::new("Asha Patil", "asha@example.com").with_role(Role::User))
        .await?;
    let customer_id = system
        .users
        .sign_up(UserCreate::new("Ravi Kumar", "ravi@example.com"))
        .await?;
    let farmer = system.users.resolve(Some(farmer_id)).await?;
    let customer = system.users.resolve(Some(customer_id)).await?;

    let fields = CropFields {
        name: "Alphonso Mango".to_string(),
        crop_type: CropType::Fruits,
        image_url: "https://images.example/alphonso.jpg".to_string(),
        location: Location {
            lat: 16.99,
            lng: 73.31,
            address: "Ratnagiri, Maharashtra".to_string(),
        },
        harvest_date: "2024-04-15".to_string(),
        quantity: 500.0,
        unit: Unit::Kg,
        price_per_unit: 120.0,
        disease_status: None,
        published: true,
    };
    let crop_id = system.crops.create(fields, &farmer).await?;
    info!(crop = %crop_id, "Crop listed");

    let span = tracing::info_span!("customer_browsing");
    let order = async {
        let fruits = system
            .crops
            .list(CropFilter::default().published(true).crop_type(CropType::Fruits))
            .await?;
        info!(count = fruits.len(), "Published fruit listings");

        system.crops.increment_views(crop_id).await?;
        let quantity = 10.0;
        let total = quantity * 120.0;
        system
            .orders
            .create(crop_id, quantity, total, &customer)
            .await
            .map_err(Box::<dyn std::error::Error>::from)
    }
    .instrument(span)
    .await;

    match order {
        Ok(order_id) => {
            info!(order = %order_id, "Order placed");
            let confirmed = system
                .orders
                .update_status(order_id, OrderStatus::Confirmed, &farmer)
                .await?;
            info!(order = %confirmed.id, status = %confirmed.status, "Order updated");
        }
        Err(e) => error!(error = %e, "Order failed"),
    }

    let stats = farmer_stats(&system.crops, &system.orders, &farmer).await?;
    info!(
        listings = stats.listings,
        views = stats.total_views,
        sales = stats.total_sales,
        revenue = stats.revenue,
        "Farmer dashboard"
    );

    system.shutdown().await?;
    info!("Farm market stopped");
    Ok(())
}
