use crate::cascade::CascadeCoordinator;
use crate::clients::{
    CartClient, OrderClient, OwnerProfileClient, ProductClient, ReviewClient, UserClient,
};
use crate::config::SystemConfig;
use crate::notify::{Notifier, TracingNotifier};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// The running marketplace: six resource actors and the cascade coordinator.
///
/// # Example
///
/// ```rust
/// use bakery_market::config::SystemConfig;
/// use bakery_market::lifecycle::BakerySystem;
/// use bakery_market::model::{Role, UserCreate};
///
/// #[tokio::main]
/// async fn main() {
///     let system = BakerySystem::new(&SystemConfig::default());
///     let id = system
///         .users
///         .create_user(UserCreate {
///             name: "Bea".into(),
///             email: "bea@example.com".into(),
///             phone: None,
///             role: Role::Owner,
///         })
///         .await
///         .unwrap();
///     assert!(system.users.require_role(id, Role::Owner).await.is_ok());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct BakerySystem {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub carts: CartClient,
    pub reviews: ReviewClient,
    pub profiles: OwnerProfileClient,
    pub cascade: CascadeCoordinator,
    handles: Vec<JoinHandle<()>>,
}

impl BakerySystem {
    /// Starts every actor, logging cancellation notices through `tracing`.
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(config: &SystemConfig, notifier: Arc<dyn Notifier>) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors (no dependencies yet)
        let (user_actor, users) = crate::user_actor::new(buffer);
        let (product_actor, products) = crate::product_actor::new(buffer);
        let (order_actor, orders) =
            crate::order_actor::new(buffer, users.clone(), products.clone(), notifier);
        let (cart_actor, carts) = crate::cart_actor::new(buffer);
        let (review_actor, reviews) = crate::review_actor::new(buffer);
        let (profile_actor, profiles) = crate::owner_profile_actor::new(buffer);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(order_actor.run((users.clone(), products.clone()))),
            tokio::spawn(cart_actor.run((users.clone(), products.clone()))),
            tokio::spawn(review_actor.run((users.clone(), products.clone()))),
            tokio::spawn(profile_actor.run(users.clone())),
            tokio::spawn(product_actor.run(users.clone())),
            tokio::spawn(user_actor.run(())),
        ];

        let cascade =
            CascadeCoordinator::new(&users, &products, &orders, &carts, &reviews, &profiles);
        info!(channel_buffer = buffer, "Bakery system started");

        Self {
            users,
            products,
            orders,
            carts,
            reviews,
            profiles,
            cascade,
            handles,
        }
    }

    /// Drops every client and waits for the actors to drain and exit.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");
        let Self {
            users,
            products,
            orders,
            carts,
            reviews,
            profiles,
            cascade,
            handles,
        } = self;
        drop(cascade);
        drop(orders);
        drop(carts);
        drop(reviews);
        drop(profiles);
        drop(products);
        drop(users);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }
        info!("System shutdown complete.");
        Ok(())
    }
}
