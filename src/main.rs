//! # Bakery Market demo
//!
//! Walks one owner and one customer through the order lifecycle:
//! 1. An order is placed and accepted, then cancelled; the stock comes back.
//! 2. A product is sold out and the next order is refused.
//! 3. The owner's account is deleted with everything that depends on it.

use actor_framework::tracing::setup_tracing;
use bakery_market::config::SystemConfig;
use bakery_market::error::Classify;
use bakery_market::lifecycle::BakerySystem;
use bakery_market::model::{
    Actor, OrderCreate, OwnerProfileCreate, ProductCreate, ProductId, Role, UserCreate, UserId,
};
use std::error::Error;
use tracing::{error, info, warn, Instrument};

fn order_for(product_id: ProductId, owner: UserId, customer: UserId, quantity: u32) -> OrderCreate {
    OrderCreate {
        product_id,
        owner_id: owner,
        customer_id: customer,
        quantity,
        message: "Happy birthday, Sam!".to_string(),
        requested_date: None,
        phone_number: "555-0100".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = SystemConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}; using defaults");
        SystemConfig::default()
    });
    setup_tracing(&config.log_filter);

    info!("Starting bakery market");
    let system = BakerySystem::new(&config);

    let owner_id = system
        .users
        .create_user(UserCreate {
            name: "Bea".to_string(),
            email: "bea@crumbs.example".to_string(),
            phone: Some("555-0199".to_string()),
            role: Role::Owner,
        })
        .await?;
    let customer_id = system
        .users
        .create_user(UserCreate {
            name: "Cal".to_string(),
            email: "cal@example.com".to_string(),
            phone: None,
            role: Role::Customer,
        })
        .await?;
    let admin_id = system
        .users
        .create_user(UserCreate {
            name: "Ada".to_string(),
            email: "ada@market.example".to_string(),
            phone: None,
            role: Role::Admin,
        })
        .await?;
    let owner = Actor::new(owner_id, Role::Owner);
    let customer = Actor::new(customer_id, Role::Customer);
    let admin = Actor::new(admin_id, Role::Admin);

    system
        .profiles
        .create_profile(
            owner,
            OwnerProfileCreate {
                user_id: owner_id,
                company_name: "Crumbs & Co".to_string(),
                description: "Small-batch sourdough".to_string(),
            },
        )
        .await?;

    let cake = system
        .products
        .create_product(ProductCreate {
            owner_id,
            name: "Carrot cake".to_string(),
            description: "Cream cheese frosting".to_string(),
            price: 30.0,
            available_quantity: 5,
        })
        .await?;

    // Scenario 1: place, accept, cancel.
    async {
        let order_id = system
            .orders
            .place_order(customer, order_for(cake, owner_id, customer_id, 3))
            .await?;
        let order = system.orders.get_order(order_id).await?;
        let stock = system.products.check_stock(cake).await?;
        info!(%order_id, total_price = order.total_price, stock, "Order placed");

        system
            .orders
            .owner_update_status(owner, order_id, "in-progress", None)
            .await?;
        let (order, notice) = system.orders.cancel_order(customer, order_id).await?;
        let stock = system.products.check_stock(cake).await?;
        info!(
            %order_id,
            status = %order.status,
            cancelled_at = %notice.cancelled_at,
            stock,
            "Order cancelled"
        );
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(tracing::info_span!("cancellation"))
    .await?;

    // Scenario 2: sell out, then get refused.
    async {
        let scones = system
            .products
            .create_product(ProductCreate {
                owner_id,
                name: "Scones".to_string(),
                description: "Batch of six".to_string(),
                price: 12.0,
                available_quantity: 2,
            })
            .await?;
        system
            .orders
            .place_order(customer, order_for(scones, owner_id, customer_id, 2))
            .await?;
        let product = system.products.get_product(scones).await?;
        info!(
            stock = product.available_quantity(),
            is_active = product.is_active(),
            "Scones sold out"
        );

        match system
            .orders
            .place_order(customer, order_for(scones, owner_id, customer_id, 1))
            .await
        {
            Ok(id) => warn!(order_id = %id, "Unexpectedly placed an order on an empty shelf"),
            Err(e) => info!(error = %e, kind = ?e.kind(), "Order refused"),
        }
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(tracing::info_span!("sold_out"))
    .await?;

    // Scenario 3: remove the owner and everything hanging off it.
    match system.cascade.delete_user(admin, owner_id).await {
        Ok(report) => info!(?report, "Owner removed"),
        Err(e) => error!(error = %e, "Owner removal failed"),
    }
    let listed = system.orders.list_for(customer).await?;
    info!(remaining_orders = listed.len(), "Customer's orders after cascade");

    system.shutdown().await?;
    info!("Demo complete");
    Ok(())
}
