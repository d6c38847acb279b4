use actor_framework::{ActorClient, Filter, Transaction};
use bakery_market::cascade::{CascadeError, CascadeReport};
use bakery_market::config::SystemConfig;
use bakery_market::error::{Classify, ErrorKind};
use bakery_market::lifecycle::BakerySystem;
use bakery_market::model::{
    Actor, Order, OrderCreate, OrderId, OwnerProfileCreate, ProductCreate, ProductId,
    ProductUpdate, ReviewCreate, Role, User, UserCreate,
};

// Account deletion against the full system.

async fn register(system: &BakerySystem, name: &str, role: Role) -> Actor {
    let id = system
        .users
        .create_user(UserCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            role,
        })
        .await
        .expect("Failed to create user");
    Actor::new(id, role)
}

async fn list_product(system: &BakerySystem, owner: Actor, name: &str, stock: u32) -> ProductId {
    system
        .products
        .create_product(ProductCreate {
            owner_id: owner.id,
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
            available_quantity: stock,
        })
        .await
        .expect("Failed to create product")
}

async fn place(
    system: &BakerySystem,
    customer: Actor,
    owner: Actor,
    product_id: ProductId,
    quantity: u32,
) -> OrderId {
    system
        .orders
        .place_order(
            customer,
            OrderCreate {
                product_id,
                owner_id: owner.id,
                customer_id: customer.id,
                quantity,
                message: String::new(),
                requested_date: None,
                phone_number: "555-0102".to_string(),
            },
        )
        .await
        .expect("Failed to place order")
}

async fn review(
    system: &BakerySystem,
    customer: Actor,
    owner: Actor,
    product_id: Option<ProductId>,
) {
    system
        .reviews
        .post_review(
            customer,
            ReviewCreate {
                customer_id: customer.id,
                owner_id: owner.id,
                product_id,
                rating: 4,
                comment: "Lovely".to_string(),
            },
        )
        .await
        .expect("Failed to post review");
}

/// An owner with a profile, two products, two orders and two reviews, plus a
/// second owner whose records must survive.
struct Scene {
    system: BakerySystem,
    owner: Actor,
    bystander: Actor,
    customer: Actor,
    admin: Actor,
    loaf: ProductId,
    kept: ProductId,
    open_order: OrderId,
    kept_order: OrderId,
}

async fn scene() -> Scene {
    let system = BakerySystem::new(&SystemConfig::default());
    let owner = register(&system, "Bea", Role::Owner).await;
    let bystander = register(&system, "Oli", Role::Owner).await;
    let customer = register(&system, "Cal", Role::Customer).await;
    let admin = register(&system, "Ada", Role::Admin).await;

    system
        .profiles
        .create_profile(
            owner,
            OwnerProfileCreate {
                user_id: owner.id,
                company_name: "Crumbs & Co".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let loaf = list_product(&system, owner, "Sourdough", 5).await;
    let roll = list_product(&system, owner, "Dinner rolls", 5).await;
    let kept = list_product(&system, bystander, "Bagel", 5).await;

    let open_order = place(&system, customer, owner, loaf, 2).await;
    let done = place(&system, customer, owner, roll, 1).await;
    system.orders.cancel_order(customer, done).await.unwrap();
    let kept_order = place(&system, customer, bystander, kept, 1).await;

    review(&system, customer, owner, Some(loaf)).await;
    review(&system, customer, owner, None).await;
    review(&system, customer, bystander, Some(kept)).await;

    Scene {
        system,
        owner,
        bystander,
        customer,
        admin,
        loaf,
        kept,
        open_order,
        kept_order,
    }
}

#[tokio::test]
async fn test_owner_cascade_removes_every_dependent() {
    let Scene {
        system,
        owner,
        bystander,
        customer,
        admin,
        loaf,
        kept,
        open_order,
        kept_order,
    } = scene().await;

    let report = system.cascade.delete_user(admin, owner.id).await.unwrap();
    assert_eq!(
        report,
        CascadeReport {
            users: 1,
            owner_profiles: 1,
            products: 2,
            orders: 2,
            carts: 0,
            reviews: 2,
        }
    );

    assert!(system.users.get(owner.id).await.unwrap().is_none());
    assert!(system.profiles.profile_for(owner.id).await.unwrap().is_none());
    assert!(system.products.get(loaf).await.unwrap().is_none());
    assert!(system.products.list_by_owner(owner.id).await.unwrap().is_empty());
    assert!(system.orders.get(open_order).await.unwrap().is_none());
    assert!(system.reviews.reviews_for_owner(owner.id).await.unwrap().is_empty());

    // The other owner's records are untouched.
    assert!(system.users.get(bystander.id).await.unwrap().is_some());
    assert!(system.products.get(kept).await.unwrap().is_some());
    let remaining = system.orders.list_for(customer).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].order.id, kept_order);
    assert_eq!(system.reviews.reviews_for_owner(bystander.id).await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_customer_cascade_removes_orders_cart_and_reviews() {
    let Scene {
        system,
        owner,
        bystander,
        customer,
        admin,
        loaf,
        ..
    } = scene().await;
    system.carts.add_item(customer, loaf, 1).await.unwrap();

    let report = system.cascade.delete_user(admin, customer.id).await.unwrap();
    assert_eq!(report.users, 1);
    assert_eq!(report.orders, 3);
    assert_eq!(report.carts, 1);
    assert_eq!(report.reviews, 3);
    assert_eq!(report.products, 0);

    assert!(system.users.get(customer.id).await.unwrap().is_none());
    assert!(system.carts.cart_for(customer.id).await.unwrap().is_none());
    assert!(system.orders.list_for(owner).await.unwrap().is_empty());
    assert!(system.orders.list_for(bystander).await.unwrap().is_empty());
    assert!(system.reviews.reviews_for_owner(owner.id).await.unwrap().is_empty());

    // Products belong to the owners and stay.
    assert!(system.products.get(loaf).await.unwrap().is_some());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_admin_operations_require_admin() {
    let Scene {
        system,
        owner,
        customer,
        admin,
        ..
    } = scene().await;

    let err = system.cascade.delete_user(owner, customer.id).await.unwrap_err();
    assert!(matches!(err, CascadeError::Unauthorized(_)));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = system.cascade.delete_all_users(customer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = system.cascade.delete_own_account(admin).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let ghost = bakery_market::model::UserId(4040);
    let err = system.cascade.delete_user(admin, ghost).await.unwrap_err();
    assert!(matches!(err, CascadeError::UserNotFound(id) if id == ghost));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(system.users.get(customer.id).await.unwrap().is_some());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_self_deletion_waits_for_open_orders() {
    let Scene {
        system,
        bystander,
        customer,
        open_order,
        kept_order,
        ..
    } = scene().await;

    let err = system.cascade.delete_own_account(customer).await.unwrap_err();
    assert!(matches!(err, CascadeError::GuardViolation(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(err.to_string().contains("pending or in-progress orders"));

    // The rejected attempt released its locks: the order can still move.
    assert!(system.users.get(customer.id).await.unwrap().is_some());
    system.orders.cancel_order(customer, open_order).await.unwrap();

    // Accepted by its owner, the last order is still open.
    system
        .orders
        .owner_update_status(bystander, kept_order, "in-progress", None)
        .await
        .unwrap();
    let err = system.cascade.delete_own_account(customer).await.unwrap_err();
    assert!(matches!(err, CascadeError::GuardViolation(_)));
    system.orders.cancel_order(customer, kept_order).await.unwrap();

    let report = system.cascade.delete_own_account(customer).await.unwrap();
    assert_eq!(report.users, 1);
    assert_eq!(report.orders, 3);
    assert!(system.users.get(customer.id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_owner_self_deletion_waits_for_inactive_products() {
    let Scene {
        system,
        owner,
        customer,
        open_order,
        ..
    } = scene().await;
    system.orders.cancel_order(customer, open_order).await.unwrap();

    let err = system.cascade.delete_own_account(owner).await.unwrap_err();
    assert!(err.to_string().contains("active products"));

    for product in system.products.list_by_owner(owner.id).await.unwrap() {
        let mut update = ProductUpdate::by(owner.id);
        update.available_quantity = Some(0);
        let updated = system
            .products
            .update_product(product.id, update)
            .await
            .unwrap();
        assert!(!updated.is_active());
    }

    let report = system.cascade.delete_own_account(owner).await.unwrap();
    assert_eq!(report.products, 2);
    assert_eq!(report.owner_profiles, 1);
    assert!(system.users.get(owner.id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_all_users_empties_every_collection() {
    let Scene {
        system,
        customer,
        admin,
        loaf,
        ..
    } = scene().await;
    system.carts.add_item(customer, loaf, 2).await.unwrap();

    let report = system.cascade.delete_all_users(admin).await.unwrap();
    assert_eq!(report.users, 4);
    assert_eq!(report.owner_profiles, 1);
    assert_eq!(report.products, 3);
    assert_eq!(report.orders, 3);
    assert_eq!(report.carts, 1);
    assert_eq!(report.reviews, 3);

    let users: Vec<User> = system.users.query(Filter::all()).await.unwrap();
    assert!(users.is_empty());
    assert!(system.products.query(Filter::all()).await.unwrap().is_empty());
    assert!(system.orders.query(Filter::all()).await.unwrap().is_empty());
    assert!(system.carts.query(Filter::all()).await.unwrap().is_empty());
    assert!(system.reviews.query(Filter::all()).await.unwrap().is_empty());
    assert!(system.profiles.query(Filter::all()).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

/// A record held by another deletion makes the bulk cascade fail partway. Nothing
/// it staged before the conflict may be removed or stay locked.
#[tokio::test]
async fn test_delete_all_users_rolls_back_on_conflict() {
    let Scene {
        system,
        owner,
        bystander,
        customer,
        admin,
        loaf,
        kept,
        open_order,
        kept_order,
    } = scene().await;
    system.carts.add_item(customer, loaf, 1).await.unwrap();

    let mut blocker = Transaction::begin();
    let held = blocker
        .prepare_delete(
            system.orders.inner(),
            Filter::new("kept order", move |o: &Order| o.id == kept_order),
        )
        .await
        .unwrap();
    assert_eq!(held.len(), 1);

    let err = system.cascade.delete_all_users(admin).await.unwrap_err();
    assert!(matches!(err, CascadeError::Busy(ref id) if *id == kept_order.to_string()));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    blocker.abort().await;

    // Every collection is exactly as it was.
    assert_eq!(system.users.query(Filter::all()).await.unwrap().len(), 4);
    assert_eq!(system.products.query(Filter::all()).await.unwrap().len(), 3);
    assert_eq!(system.orders.query(Filter::all()).await.unwrap().len(), 3);
    assert_eq!(system.carts.query(Filter::all()).await.unwrap().len(), 1);
    assert_eq!(system.reviews.query(Filter::all()).await.unwrap().len(), 3);
    assert_eq!(system.profiles.query(Filter::all()).await.unwrap().len(), 1);

    // And nothing is left locked.
    assert!(system.users.toggle_wishlist(customer, kept).await.unwrap());
    let mut update = ProductUpdate::by(owner.id);
    update.available_quantity = Some(9);
    let product = system.products.update_product(loaf, update).await.unwrap();
    assert_eq!(product.available_quantity(), 9);
    system.orders.cancel_order(customer, open_order).await.unwrap();
    system.orders.cancel_order(customer, kept_order).await.unwrap();
    let cart = system.carts.add_item(customer, kept, 1).await.unwrap();
    assert_eq!(cart.items.len(), 2);
    let review = system.reviews.reviews_for_owner(bystander.id).await.unwrap()[0].id;
    let edited = system
        .reviews
        .edit_review(customer, review, Some(5), None)
        .await
        .unwrap();
    assert_eq!(edited.rating, 5);
    let profile = system.profiles.profile_for(owner.id).await.unwrap().unwrap();
    system
        .profiles
        .update_profile(owner, profile.id, None, Some("Open again".into()))
        .await
        .unwrap();

    // With the conflict gone the same batch goes through.
    let report = system.cascade.delete_all_users(admin).await.unwrap();
    assert_eq!(report.users, 4);
    assert!(system.orders.query(Filter::all()).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_report_serializes_camel_case() {
    let Scene { system, owner, admin, .. } = scene().await;
    let report = system.cascade.delete_user(admin, owner.id).await.unwrap();
    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["ownerProfiles"], 1);
    assert_eq!(json["users"], 1);
    assert_eq!(report.total(), 8);

    // Once gone, the owner can no longer sell.
    let err = system
        .products
        .create_product(ProductCreate {
            owner_id: owner.id,
            name: "Ghost loaf".into(),
            description: String::new(),
            price: 1.0,
            available_quantity: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}
