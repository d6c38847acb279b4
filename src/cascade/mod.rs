//! # Cascade Deletion
//!
//! Removes a user together with every record that must not outlive it, as one
//! [`Transaction`] spanning the six resource actors.
//!
//! ## Protocol
//!
//! 1. Stage the user first. From then on the user is locked, so `RequireRole` fails
//!    and no new product, order, cart, review or profile can be created for it.
//! 2. Stage the dependents the user's [`CascadePlan`] names.
//! 3. Self-service only: check the guards against the staged snapshots. Staged records
//!    cannot change, so what was checked is what gets deleted.
//! 4. Commit, or abort on any failure. An abort leaves every store as it was.
//!
//! Readers keep seeing the complete pre-deletion state until the commit.

pub mod error;
pub mod plan;

pub use error::*;
pub use plan::*;

use crate::clients::{
    CartClient, OrderClient, OwnerProfileClient, ProductClient, ReviewClient, UserClient,
};
use crate::model::{
    Actor, Cart, Order, OwnerProfile, Product, ProductId, Review, Role, User, UserId,
};
use actor_framework::{ActorClient, Filter, ResourceClient, Transaction};
use std::collections::HashSet;
use tracing::{error, info, instrument, warn};

/// Coordinates multi-actor deletions. Cheap to clone.
#[derive(Clone)]
pub struct CascadeCoordinator {
    users: ResourceClient<User>,
    products: ResourceClient<Product>,
    orders: ResourceClient<Order>,
    carts: ResourceClient<Cart>,
    reviews: ResourceClient<Review>,
    profiles: ResourceClient<OwnerProfile>,
}

fn require_admin(actor: &Actor) -> Result<(), CascadeError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(CascadeError::Unauthorized(
            "Only an admin can delete other users.".into(),
        ))
    }
}

impl CascadeCoordinator {
    pub fn new(
        users: &UserClient,
        products: &ProductClient,
        orders: &OrderClient,
        carts: &CartClient,
        reviews: &ReviewClient,
        profiles: &OwnerProfileClient,
    ) -> Self {
        Self {
            users: users.inner().clone(),
            products: products.inner().clone(),
            orders: orders.inner().clone(),
            carts: carts.inner().clone(),
            reviews: reviews.inner().clone(),
            profiles: profiles.inner().clone(),
        }
    }

    /// Admin deletion of one user and all of its dependents.
    #[instrument(skip(self))]
    pub async fn delete_user(
        &self,
        actor: Actor,
        user_id: UserId,
    ) -> Result<CascadeReport, CascadeError> {
        require_admin(&actor)?;
        let mut tx = Transaction::begin();
        let mut staged = Staged::default();
        match self.stage_user(&mut tx, user_id, &mut staged).await {
            Ok(plan) => {
                info!(%user_id, %plan, "Cascade staged");
                self.commit(tx, &staged).await
            }
            Err(e) => {
                warn!(%user_id, error = %e, "Cascade aborted");
                tx.abort().await;
                Err(e)
            }
        }
    }

    /// Admin deletion of every user, as a single transaction. A failure on any user
    /// aborts the whole batch.
    #[instrument(skip(self))]
    pub async fn delete_all_users(&self, actor: Actor) -> Result<CascadeReport, CascadeError> {
        require_admin(&actor)?;
        let mut tx = Transaction::begin();
        let mut staged = Staged::default();
        match self.stage_everyone(&mut tx, &mut staged).await {
            Ok(()) => {
                info!(users = staged.users.len(), "Bulk cascade staged");
                self.commit(tx, &staged).await
            }
            Err(e) => {
                warn!(error = %e, "Bulk cascade aborted");
                tx.abort().await;
                Err(e)
            }
        }
    }

    /// Self-service account deletion.
    ///
    /// Rejected while the caller has a pending or in-progress order, and, for owners,
    /// while any of their products is still active.
    #[instrument(skip(self))]
    pub async fn delete_own_account(
        &self,
        actor: Actor,
    ) -> Result<CascadeReport, CascadeError> {
        if !matches!(actor.role, Role::Customer | Role::Owner) {
            return Err(CascadeError::Unauthorized(
                "Only customers and owners can delete their own account.".into(),
            ));
        }
        let mut tx = Transaction::begin();
        let mut staged = Staged::default();
        let outcome = match self.stage_user(&mut tx, actor.id, &mut staged).await {
            Ok(_) => check_guards(&staged),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => self.commit(tx, &staged).await,
            Err(e) => {
                warn!(user_id = %actor.id, error = %e, "Self-deletion rejected");
                tx.abort().await;
                Err(e)
            }
        }
    }

    async fn commit(
        &self,
        tx: Transaction,
        staged: &Staged,
    ) -> Result<CascadeReport, CascadeError> {
        let report = staged.report();
        let tx_id = tx.id();
        match tx.commit().await {
            Ok(removed) => {
                if removed != report.total() {
                    warn!(
                        %tx_id,
                        removed,
                        staged = report.total(),
                        "Commit count differs from staged count"
                    );
                }
                info!(%tx_id, ?report, "Cascade committed");
                Ok(report)
            }
            Err(e) => {
                error!(%tx_id, error = %e, "Cascade commit failed");
                Err(CascadeError::Incomplete(e))
            }
        }
    }

    async fn stage_everyone(
        &self,
        tx: &mut Transaction,
        staged: &mut Staged,
    ) -> Result<(), CascadeError> {
        let users = tx
            .prepare_delete(&self.users, Filter::all())
            .await
            .map_err(CascadeError::from_prepare)?;
        for user in &users {
            self.stage_dependents(tx, CascadePlan::for_role(user.role), user.id, staged)
                .await?;
        }
        staged.users.extend(users);
        Ok(())
    }

    /// Stages the user, then the dependents its role calls for.
    async fn stage_user(
        &self,
        tx: &mut Transaction,
        user_id: UserId,
        staged: &mut Staged,
    ) -> Result<CascadePlan, CascadeError> {
        let user = tx
            .prepare_delete(&self.users, Filter::new("id", move |u: &User| u.id == user_id))
            .await
            .map_err(CascadeError::from_prepare)?
            .into_iter()
            .next()
            .ok_or(CascadeError::UserNotFound(user_id))?;
        let plan = CascadePlan::for_role(user.role);
        staged.users.push(user);
        self.stage_dependents(tx, plan, user_id, staged).await?;
        Ok(plan)
    }

    async fn stage_dependents(
        &self,
        tx: &mut Transaction,
        plan: CascadePlan,
        me: UserId,
        staged: &mut Staged,
    ) -> Result<(), CascadeError> {
        match plan {
            CascadePlan::Owner => {
                let profiles = tx
                    .prepare_delete(
                        &self.profiles,
                        Filter::new("owner profile", move |p: &OwnerProfile| p.user_id == me),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.profiles.extend(profiles);

                let products = tx
                    .prepare_delete(
                        &self.products,
                        Filter::new("owned products", move |p: &Product| p.owner_id == me),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                let ids: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
                staged.products.extend(products);

                let order_ids = ids.clone();
                let orders = tx
                    .prepare_delete(
                        &self.orders,
                        Filter::new("orders on owned products", move |o: &Order| {
                            o.owner_id == me || order_ids.contains(&o.product_id)
                        }),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.orders.extend(orders);

                let reviews = tx
                    .prepare_delete(
                        &self.reviews,
                        Filter::new("reviews of owner", move |r: &Review| {
                            r.owner_id == me || r.product_id.is_some_and(|p| ids.contains(&p))
                        }),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.reviews.extend(reviews);
            }
            CascadePlan::Customer => {
                let orders = tx
                    .prepare_delete(
                        &self.orders,
                        Filter::new("orders placed", move |o: &Order| o.customer_id == me),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.orders.extend(orders);

                let carts = tx
                    .prepare_delete(
                        &self.carts,
                        Filter::new("cart", move |c: &Cart| c.customer_id == me),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.carts.extend(carts);

                let reviews = tx
                    .prepare_delete(
                        &self.reviews,
                        Filter::new("reviews by or about user", move |r: &Review| {
                            r.customer_id == me || r.owner_id == me
                        }),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.reviews.extend(reviews);
            }
            CascadePlan::Account => {
                let reviews = tx
                    .prepare_delete(
                        &self.reviews,
                        Filter::new("reviews about user", move |r: &Review| r.owner_id == me),
                    )
                    .await
                    .map_err(CascadeError::from_prepare)?;
                staged.reviews.extend(reviews);
            }
        }
        Ok(())
    }
}

/// Self-service guards, evaluated on what is actually staged.
fn check_guards(staged: &Staged) -> Result<(), CascadeError> {
    if staged.orders.iter().any(|o| o.status.is_open()) {
        return Err(CascadeError::GuardViolation(
            "You cannot delete your account while you have pending or in-progress orders."
                .into(),
        ));
    }
    if staged.products.iter().any(|p| p.is_active()) {
        return Err(CascadeError::GuardViolation(
            "You cannot delete your account while you have active products.".into(),
        ));
    }
    Ok(())
}
