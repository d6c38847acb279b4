use actor_framework::ActorClient;
use bakery_market::config::SystemConfig;
use bakery_market::error::{Classify, ErrorKind};
use bakery_market::lifecycle::BakerySystem;
use bakery_market::model::{
    Actor, OrderCreate, OrderStatus, ProductCreate, ProductId, Role, UserCreate, UserId,
};
use bakery_market::notify::RecordingNotifier;
use bakery_market::order_actor::OrderError;
use bakery_market::product_actor::ProductError;
use std::sync::Arc;

// Full end-to-end tests with all real actors.

async fn register(system: &BakerySystem, name: &str, role: Role) -> Actor {
    let id = system
        .users
        .create_user(UserCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: Some("555-0100".to_string()),
            role,
        })
        .await
        .expect("Failed to create user");
    Actor::new(id, role)
}

async fn list_product(
    system: &BakerySystem,
    owner: &Actor,
    name: &str,
    price: f64,
    stock: u32,
) -> ProductId {
    system
        .products
        .create_product(ProductCreate {
            owner_id: owner.id,
            name: name.to_string(),
            description: format!("{name}, baked this morning"),
            price,
            available_quantity: stock,
        })
        .await
        .expect("Failed to create product")
}

fn order(product_id: ProductId, owner: UserId, customer: UserId, quantity: u32) -> OrderCreate {
    OrderCreate {
        product_id,
        owner_id: owner,
        customer_id: customer,
        quantity,
        message: "No nuts please".to_string(),
        requested_date: None,
        phone_number: "555-0101".to_string(),
    }
}

struct Market {
    system: BakerySystem,
    owner: Actor,
    customer: Actor,
    admin: Actor,
}

async fn market() -> Market {
    let system = BakerySystem::new(&SystemConfig::default());
    let owner = register(&system, "Bea", Role::Owner).await;
    let customer = register(&system, "Cal", Role::Customer).await;
    let admin = register(&system, "Ada", Role::Admin).await;
    Market {
        system,
        owner,
        customer,
        admin,
    }
}

#[tokio::test]
async fn test_cancel_after_accept_restores_stock() {
    let Market {
        system,
        owner,
        customer,
        ..
    } = market().await;
    let cake = list_product(&system, &owner, "Carrot cake", 30.0, 5).await;

    let order_id = system
        .orders
        .place_order(customer, order(cake, owner.id, customer.id, 3))
        .await
        .expect("Failed to place order");

    let placed = system.orders.get_order(order_id).await.unwrap();
    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.total_price, 90.0);
    assert_eq!(system.products.check_stock(cake).await.unwrap(), 2);

    let accepted = system
        .orders
        .owner_update_status(owner, order_id, "in-progress", None)
        .await
        .unwrap();
    assert_eq!(accepted.status, OrderStatus::InProgress);

    let (cancelled, notice) = system.orders.cancel_order(customer, order_id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(notice.order_id, order_id);
    assert_eq!(notice.owner_id, owner.id);
    assert_eq!(notice.customer_id, customer.id);

    let product = system.products.get_product(cake).await.unwrap();
    assert_eq!(product.available_quantity(), 5);
    assert!(product.is_active());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sold_out_product_rejects_next_order() {
    let Market {
        system,
        owner,
        customer,
        ..
    } = market().await;
    let scones = list_product(&system, &owner, "Scones", 12.0, 2).await;

    system
        .orders
        .place_order(customer, order(scones, owner.id, customer.id, 2))
        .await
        .unwrap();
    let product = system.products.get_product(scones).await.unwrap();
    assert_eq!(product.available_quantity(), 0);
    assert!(!product.is_active());

    let err = system
        .orders
        .place_order(customer, order(scones, owner.id, customer.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceConstraint);
    assert_eq!(err.to_string(), "Not enough stock available.");
    assert!(matches!(
        err,
        OrderError::Product(ProductError::InsufficientStock {
            requested: 1,
            available: 0
        })
    ));

    // The refused order left nothing behind.
    let listed = system.orders.list_for(customer).await.unwrap();
    assert_eq!(listed.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_placement_validates_parties_and_quantity() {
    let Market {
        system,
        owner,
        customer,
        admin,
    } = market().await;
    let bread = list_product(&system, &owner, "Rye", 8.0, 4).await;

    // An owner cannot order on a customer's behalf.
    let err = system
        .orders
        .place_order(owner, order(bread, owner.id, customer.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    // The named owner must actually be an owner.
    let err = system
        .orders
        .place_order(customer, order(bread, admin.id, customer.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    // ... and must be the one selling the product.
    let other_owner = register(&system, "Oli", Role::Owner).await;
    let err = system
        .orders
        .place_order(customer, order(bread, other_owner.id, customer.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = system
        .orders
        .place_order(customer, order(bread, owner.id, customer.id, 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = system
        .orders
        .place_order(customer, order(ProductId(999), owner.id, customer.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(system.products.check_stock(bread).await.unwrap(), 4);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_owner_reject_and_customer_disagree_restock() {
    let Market {
        system,
        owner,
        customer,
        ..
    } = market().await;
    let pie = list_product(&system, &owner, "Apple pie", 20.0, 3).await;

    let rejected = system
        .orders
        .place_order(customer, order(pie, owner.id, customer.id, 2))
        .await
        .unwrap();
    let order_after = system
        .orders
        .owner_update_status(owner, rejected, "rejected", None)
        .await
        .unwrap();
    assert_eq!(order_after.status, OrderStatus::Cancelled);
    assert_eq!(system.products.check_stock(pie).await.unwrap(), 3);

    let declined = system
        .orders
        .place_order(customer, order(pie, owner.id, customer.id, 3))
        .await
        .unwrap();
    assert_eq!(system.products.check_stock(pie).await.unwrap(), 0);
    system
        .orders
        .owner_update_status(owner, declined, "in-progress", None)
        .await
        .unwrap();
    let order_after = system
        .orders
        .confirm_agreement(customer, declined, false)
        .await
        .unwrap();
    assert_eq!(order_after.status, OrderStatus::Cancelled);

    let product = system.products.get_product(pie).await.unwrap();
    assert_eq!(product.available_quantity(), 3);
    assert!(product.is_active());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_terminal_orders_are_immutable() {
    let Market {
        system,
        owner,
        customer,
        ..
    } = market().await;
    let bun = list_product(&system, &owner, "Cinnamon bun", 4.0, 10).await;

    let order_id = system
        .orders
        .place_order(customer, order(bun, owner.id, customer.id, 2))
        .await
        .unwrap();
    system.orders.cancel_order(customer, order_id).await.unwrap();

    let err = system
        .orders
        .cancel_order(customer, order_id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Order is already delivered or cancelled.");

    let err = system
        .orders
        .owner_update_status(owner, order_id, "in-progress", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Only pending orders can be accepted or rejected.");

    let err = system
        .orders
        .mark_ready(owner, order_id, None, None)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Order must be in progress before it can be marked as ready."
    );
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    // A second cancellation must not restock twice.
    assert_eq!(system.products.check_stock(bun).await.unwrap(), 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_only_the_right_party_can_act() {
    let Market {
        system,
        owner,
        customer,
        ..
    } = market().await;
    let stranger = register(&system, "Sid", Role::Customer).await;
    let rival = register(&system, "Rae", Role::Owner).await;
    let tart = list_product(&system, &owner, "Lemon tart", 15.0, 5).await;

    let order_id = system
        .orders
        .place_order(customer, order(tart, owner.id, customer.id, 1))
        .await
        .unwrap();

    let err = system
        .orders
        .owner_update_status(rival, order_id, "in-progress", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = system
        .orders
        .owner_update_status(customer, order_id, "in-progress", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = system
        .orders
        .cancel_order(stranger, order_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = system
        .orders
        .cancel_order(owner, order_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let untouched = system.orders.get_order(order_id).await.unwrap();
    assert_eq!(untouched.status, OrderStatus::Pending);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_agreement_payment_and_ready() {
    let Market {
        system,
        owner,
        customer,
        admin,
    } = market().await;
    let cake = list_product(&system, &owner, "Wedding cake", 250.0, 1).await;

    let order_id = system
        .orders
        .place_order(customer, order(cake, owner.id, customer.id, 1))
        .await
        .unwrap();

    // Agreement needs an accepted order.
    let err = system
        .orders
        .confirm_agreement(customer, order_id, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let eta = chrono::Utc::now() + chrono::Duration::days(3);
    let accepted = system
        .orders
        .owner_update_status(owner, order_id, "in-progress", Some(eta))
        .await
        .unwrap();
    assert_eq!(accepted.estimated_completion_time, Some(eta));

    // Payment needs the agreement first.
    let err = system
        .orders
        .submit_payment(customer, order_id, "https://img.example/receipt.png".into())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let agreed = system
        .orders
        .confirm_agreement(customer, order_id, true)
        .await
        .unwrap();
    assert!(agreed.customer_agreement_time.is_some());
    assert_eq!(agreed.status, OrderStatus::InProgress);

    let submitted = system
        .orders
        .submit_payment(customer, order_id, "https://img.example/receipt.png".into())
        .await
        .unwrap();
    assert!(!submitted.payment.is_paid);

    let err = system
        .orders
        .confirm_payment(owner, order_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let paid = system.orders.confirm_payment(admin, order_id).await.unwrap();
    assert!(paid.payment.is_paid);
    assert!(paid.payment.paid_at.is_some());

    let ready = system
        .orders
        .mark_ready(
            owner,
            order_id,
            Some("Side door".into()),
            Some("https://maps.example/bakery".into()),
        )
        .await
        .unwrap();
    assert_eq!(ready.status, OrderStatus::Delivered);
    assert_eq!(ready.pickup_location.as_deref(), Some("Side door"));
    assert!(ready.ready_at.is_some());

    // Delivered keeps the stock consumed.
    assert_eq!(system.products.check_stock(cake).await.unwrap(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_listing_is_role_filtered_and_newest_first() {
    let Market {
        system,
        owner,
        customer,
        admin,
    } = market().await;
    let other_customer = register(&system, "Dee", Role::Customer).await;
    let other_owner = register(&system, "Eli", Role::Owner).await;
    let loaf = list_product(&system, &owner, "Sourdough", 9.0, 10).await;
    let bagel = list_product(&system, &other_owner, "Bagel", 2.0, 10).await;

    let first = system
        .orders
        .place_order(customer, order(loaf, owner.id, customer.id, 1))
        .await
        .unwrap();
    let second = system
        .orders
        .place_order(other_customer, order(loaf, owner.id, other_customer.id, 2))
        .await
        .unwrap();
    let elsewhere = system
        .orders
        .place_order(customer, order(bagel, other_owner.id, customer.id, 3))
        .await
        .unwrap();

    let for_owner = system.orders.list_for(owner).await.unwrap();
    let ids: Vec<_> = for_owner.iter().map(|v| v.order.id).collect();
    assert_eq!(ids, vec![second, first]);

    let view = &for_owner[0];
    assert_eq!(view.product.as_ref().map(|p| p.name.as_str()), Some("Sourdough"));
    assert_eq!(view.customer.as_ref().map(|c| c.name.as_str()), Some("Dee"));
    assert_eq!(view.owner.as_ref().map(|o| o.id), Some(owner.id));

    let for_customer = system.orders.list_for(customer).await.unwrap();
    let ids: Vec<_> = for_customer.iter().map(|v| v.order.id).collect();
    assert_eq!(ids, vec![elsewhere, first]);

    let err = system.orders.list_for(admin).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let Market {
        system,
        owner,
        customer,
        ..
    } = market().await;
    let croissant = list_product(&system, &owner, "Croissant", 3.5, 5).await;

    let mut handles = Vec::new();
    for _ in 0..12 {
        let orders = system.orders.clone();
        let params = order(croissant, owner.id, customer.id, 1);
        handles.push(tokio::spawn(async move {
            orders.place_order(customer, params).await
        }));
    }

    let mut placed = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => placed += 1,
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::ResourceConstraint);
                refused += 1;
            }
        }
    }
    assert_eq!(placed, 5);
    assert_eq!(refused, 7);

    let product = system.products.get_product(croissant).await.unwrap();
    assert_eq!(product.available_quantity(), 0);
    assert!(!product.is_active());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancellation_notice_delivery_is_best_effort() {
    let notifier = Arc::new(RecordingNotifier::new());
    let system = BakerySystem::with_notifier(&SystemConfig::default(), notifier.clone());
    let owner = register(&system, "Bea", Role::Owner).await;
    let customer = register(&system, "Cal", Role::Customer).await;
    let muffin = list_product(&system, &owner, "Muffin", 3.0, 6).await;

    let first = system
        .orders
        .place_order(customer, order(muffin, owner.id, customer.id, 2))
        .await
        .unwrap();
    system.orders.cancel_order(customer, first).await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].order_id, first);
    assert_eq!(sent[0].product_id, muffin);

    // Owner rejections do not notify.
    let rejected = system
        .orders
        .place_order(customer, order(muffin, owner.id, customer.id, 1))
        .await
        .unwrap();
    system
        .orders
        .owner_update_status(owner, rejected, "cancelled", None)
        .await
        .unwrap();
    assert_eq!(notifier.sent().len(), 1);

    notifier.set_failing(true);
    let second = system
        .orders
        .place_order(customer, order(muffin, owner.id, customer.id, 2))
        .await
        .unwrap();
    let (cancelled, _) = system.orders.cancel_order(customer, second).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(system.products.check_stock(muffin).await.unwrap(), 6);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_carts_reviews_and_profiles() {
    let Market {
        system,
        owner,
        customer,
        admin,
    } = market().await;
    let loaf = list_product(&system, &owner, "Brioche", 7.0, 3).await;

    let created = system.carts.add_item(customer, loaf, 1).await.unwrap();
    let cart = system.carts.add_item(customer, loaf, 2).await.unwrap();
    assert_eq!(cart.id, created.id);
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert!(system.carts.add_item(owner, loaf, 1).await.is_err());

    assert!(system.users.toggle_wishlist(customer, loaf).await.unwrap());
    assert!(!system.users.toggle_wishlist(customer, loaf).await.unwrap());

    let profile_id = system
        .profiles
        .create_profile(
            owner,
            bakery_market::model::OwnerProfileCreate {
                user_id: owner.id,
                company_name: "Crumbs & Co".into(),
                description: "Small batches".into(),
            },
        )
        .await
        .unwrap();
    let profile = system.profiles.verify(admin, profile_id).await.unwrap();
    assert!(profile.is_verified);

    let review_id = system
        .reviews
        .post_review(
            customer,
            bakery_market::model::ReviewCreate {
                customer_id: customer.id,
                owner_id: owner.id,
                product_id: Some(loaf),
                rating: 5,
                comment: "Perfect crumb".into(),
            },
        )
        .await
        .unwrap();
    let reviews = system.reviews.reviews_for_owner(owner.id).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, review_id);

    system.carts.clear(customer).await.unwrap();
    assert!(system.carts.cart_for(customer.id).await.unwrap().is_none());
    assert!(system.carts.get(cart.id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}
