use chrono::{Duration, Utc};

use patter::intent::Intent;
use patter::session::Cart;
use patter::store::{
    CancelOutcome, CommerceStore, MemoryStore, OrderDetails, OrderStatus, OrderSummary, Product,
    StoreError,
};
use patter::{DialogueContext, DialogueEngine};

fn engine_with_catalog() -> DialogueEngine<MemoryStore> {
    DialogueEngine::new(MemoryStore::with_catalog())
}

/// Catalog store with one pending order (id 1) for user 1, placed two hours
/// ago: Idli Mix x2 + Upma Mix x1, total 140.
fn seeded_engine() -> DialogueEngine<MemoryStore> {
    let store = MemoryStore::with_catalog();
    store
        .add_order(
            1,
            OrderStatus::Pending,
            Utc::now() - Duration::hours(2),
            &[(1, 2), (3, 1)],
        )
        .unwrap();
    DialogueEngine::new(store)
}

fn reply(engine: &DialogueEngine<MemoryStore>, message: &str, user: Option<i64>) -> String {
    engine
        .process_message(DialogueContext {
            message,
            user,
            cart: None,
        })
        .reply
}

#[test]
fn test_fixed_replies() {
    let engine = engine_with_catalog();

    // 1. Greeting, goodbye and help always answer with the same text.
    let result = engine.process_message(DialogueContext {
        message: "hello",
        user: None,
        cart: None,
    });
    assert_eq!(
        result.reply,
        "Hello! How can I help you today? You can ask me about products, track your orders, or get recommendations."
    );
    assert_eq!(result.responded_intent, Intent::Greeting);
    assert_eq!(result.redirect_hint, None, "the engine never sets redirects");

    assert_eq!(
        reply(&engine, "bye", None),
        "Thank you for chatting! If you need anything else, I'm here to help."
    );
    assert_eq!(
        reply(&engine, "help", None),
        "I can help you with: placing orders, tracking your orders, cancelling orders, and recommending products. What would you like to do?"
    );
}

#[test]
fn test_add_to_cart_round_trip() {
    let engine = engine_with_catalog();
    let mut cart = Cart::new();

    // 1. First mention puts one unit of Idli Mix (id 1) in the cart.
    let result = engine.process_message(DialogueContext {
        message: "add idli mix to cart",
        user: Some(1),
        cart: Some(&mut cart),
    });
    assert_eq!(
        result.reply,
        "Idli Mix has been added to your cart. Would you like to proceed to checkout or continue shopping?"
    );
    assert_eq!(cart.quantity("1"), Some(1));
    assert_eq!(cart.len(), 1);

    // 2. Repeating the message bumps the quantity instead of adding a key.
    engine.process_message(DialogueContext {
        message: "add idli mix to cart",
        user: Some(1),
        cart: Some(&mut cart),
    });
    assert_eq!(cart.quantity("1"), Some(2));
    assert_eq!(cart.len(), 1);
}

#[test]
fn test_placement_prompts_when_no_product_named() {
    let engine = engine_with_catalog();
    let mut cart = Cart::new();

    let result = engine.process_message(DialogueContext {
        message: "i want to buy",
        user: Some(1),
        cart: Some(&mut cart),
    });
    assert_eq!(
        result.reply,
        "What product would you like to order? We have Idli Mix, Dosa Mix, Upma Mix, and many more!"
    );
    assert!(cart.is_empty(), "prompting must not touch the cart");
}

#[test]
fn test_placement_reports_unknown_product() {
    // 1. A store that only stocks Idli Mix.
    let store = MemoryStore::with_products(vec![Product {
        id: 1,
        name: "Idli Mix".to_string(),
        price: 50.0,
    }]);
    let engine = DialogueEngine::new(store);
    let mut cart = Cart::new();

    let result = engine.process_message(DialogueContext {
        message: "buy thandai mix",
        user: Some(1),
        cart: Some(&mut cart),
    });
    assert_eq!(
        result.reply,
        "I couldn't find thandai Mix in our inventory. Would you like to see our available products?"
    );
    assert!(cart.is_empty());
}

#[test]
fn test_placement_requires_a_cart() {
    let engine = engine_with_catalog();

    assert_eq!(
        reply(&engine, "buy idli mix", None),
        "Please log in to add products to your cart."
    );
}

#[test]
fn test_tracking_happy_path() {
    let engine = seeded_engine();

    assert_eq!(
        reply(&engine, "track my order 1", Some(1)),
        "Your order #1 is currently pending. The total amount is ₹140. Items: Idli Mix (x2), Upma Mix (x1)"
    );
}

#[test]
fn test_tracking_lists_recent_orders_without_an_id() {
    let engine = seeded_engine();

    let text = reply(&engine, "track my order", Some(1));
    assert!(
        text.starts_with("Here are your recent orders:\n"),
        "got: {}",
        text
    );
    assert!(text.contains("Order #1: pending, Total: ₹140"), "got: {}", text);
    assert!(text.ends_with("Which order would you like to track?"));
}

#[test]
fn test_tracking_prompts() {
    let engine = engine_with_catalog();

    // 1. No id and nobody signed in: ask for the id.
    assert_eq!(
        reply(&engine, "track my order", None),
        "Please provide your order ID so I can track it for you."
    );

    // 2. Signed in but no order history: still ask for the id.
    assert_eq!(
        reply(&engine, "track my order", Some(7)),
        "Please provide your order ID so I can track it for you."
    );

    // 3. An id without a signed-in user: ask to log in.
    assert_eq!(
        reply(&engine, "track my order 1", None),
        "Please log in to track your order."
    );
}

#[test]
fn test_tracking_unknown_order() {
    let engine = seeded_engine();

    assert_eq!(
        reply(&engine, "track my order 999", Some(1)),
        "I couldn't find order #999. Please check the order number and try again."
    );
}

#[test]
fn test_tracking_is_scoped_to_the_owner() {
    let engine = seeded_engine();

    // User 2 cannot see user 1's order.
    assert_eq!(
        reply(&engine, "track my order 1", Some(2)),
        "I couldn't find order #1. Please check the order number and try again."
    );
}

#[test]
fn test_cancellation_advice_is_advisory_only() {
    let engine = seeded_engine();

    // 1. The order is eligible, so the reply promises a cancellation.
    assert_eq!(
        reply(&engine, "cancel 1", Some(1)),
        "I've initiated the cancellation for order #1. You'll receive a refund soon."
    );

    // 2. The store is untouched; only CommerceStore::cancel_order writes.
    let details = engine.store().order_details(1, 1).unwrap().unwrap();
    assert_eq!(details.status, OrderStatus::Pending);
}

#[test]
fn test_cancellation_advice_already_cancelled() {
    let store = MemoryStore::with_catalog();
    store
        .add_order(
            1,
            OrderStatus::Cancelled,
            Utc::now() - Duration::hours(1),
            &[(1, 1)],
        )
        .unwrap();
    let engine = DialogueEngine::new(store);

    assert_eq!(reply(&engine, "cancel 1", Some(1)), "Order is already cancelled");
}

#[test]
fn test_cancellation_advice_expired() {
    let store = MemoryStore::with_catalog();
    store
        .add_order(
            1,
            OrderStatus::Pending,
            Utc::now() - Duration::hours(25),
            &[(1, 1)],
        )
        .unwrap();
    let engine = DialogueEngine::new(store);

    assert_eq!(
        reply(&engine, "cancel 1", Some(1)),
        "Order cannot be cancelled as it's been more than 24 hours"
    );
}

#[test]
fn test_cancellation_advice_missing_order() {
    let engine = seeded_engine();

    assert_eq!(reply(&engine, "cancel 99", Some(1)), "Order not found");
}

#[test]
fn test_cancellation_listing_and_prompts() {
    let engine = seeded_engine();

    // 1. No id but a history to pick from.
    let text = reply(&engine, "cancel", Some(1));
    assert!(text.starts_with("Here are your recent orders:\n"), "got: {}", text);
    assert!(text.ends_with("Which order would you like to cancel?"));

    // 2. No id, nobody signed in.
    assert_eq!(
        reply(&engine, "cancel", None),
        "Please provide your order ID so I can cancel it for you."
    );

    // 3. An id without a signed-in user.
    assert_eq!(
        reply(&engine, "cancel 5", None),
        "Please log in to cancel your order."
    );
}

#[test]
fn test_recommendations_require_login() {
    let engine = engine_with_catalog();

    assert_eq!(
        reply(&engine, "what do you recommend", None),
        "Please log in to get personalized recommendations."
    );
}

#[test]
fn test_recommendations_exclude_order_history() {
    let store = MemoryStore::with_products(vec![
        Product {
            id: 1,
            name: "Idli Mix".to_string(),
            price: 50.0,
        },
        Product {
            id: 2,
            name: "Dosa Mix".to_string(),
            price: 60.0,
        },
        Product {
            id: 3,
            name: "Upma Mix".to_string(),
            price: 40.0,
        },
    ]);
    store
        .add_order(1, OrderStatus::Pending, Utc::now(), &[(1, 1)])
        .unwrap();
    let engine = DialogueEngine::new(store);

    let text = reply(&engine, "what do you recommend", Some(1));
    assert!(
        !text.contains("Idli Mix"),
        "already-ordered product must not come back: {}",
        text
    );
    assert!(text.contains("Dosa Mix"), "got: {}", text);
    assert!(text.contains("Upma Mix"), "got: {}", text);
}

#[test]
fn test_recommendation_reply_shape() {
    let engine = engine_with_catalog();

    // No history: three random picks from the full catalog.
    let text = reply(&engine, "what do you recommend", Some(5));
    let names = match text.strip_prefix("Based on your preferences, you might like: ") {
        Some(rest) => rest,
        None => panic!("Expected the recommendation preamble, got: {}", text),
    };
    assert_eq!(names.split(", ").count(), 3);
}

#[test]
fn test_recommendations_with_empty_catalog() {
    let engine = DialogueEngine::new(MemoryStore::with_products(Vec::new()));

    assert_eq!(
        reply(&engine, "what do you recommend", Some(1)),
        "I don't have enough information to make recommendations yet. Try exploring our product catalog!"
    );
}

#[test]
fn test_clarification_suggests_a_known_product() {
    let engine = engine_with_catalog();

    // "dosa" matches no intent, but it is a catalog stem.
    assert_eq!(
        reply(&engine, "dosa", None),
        "Are you looking to add Dosa Mix to your cart? Please say 'add Dosa Mix to cart' to proceed."
    );
}

#[test]
fn test_clarification_generic_fallback() {
    let engine = engine_with_catalog();

    assert_eq!(
        reply(&engine, "zzz qqq www", None),
        "I'm not sure I understand. Would you like to place an order, track an order, or get product recommendations?"
    );
}

/// Store whose every call fails, to prove the engine still replies.
struct FailingStore;

impl CommerceStore for FailingStore {
    fn find_product(&self, _name: &str) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }

    fn order_details(&self, _order: i64, _user: i64) -> Result<Option<OrderDetails>, StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }

    fn recent_orders(&self, _user: i64, _limit: usize) -> Result<Vec<OrderSummary>, StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }

    fn recommend_products(&self, _user: i64, _limit: usize) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }

    fn cancel_order(&self, _order: i64, _user: i64) -> Result<CancelOutcome, StoreError> {
        Err(StoreError::Backend("offline".to_string()))
    }
}

#[test]
fn test_store_faults_degrade_to_miss_replies() {
    let engine = DialogueEngine::new(FailingStore);

    // 1. Tracking a specific order degrades to the not-found wording.
    let result = engine.process_message(DialogueContext {
        message: "track my order 5",
        user: Some(1),
        cart: None,
    });
    assert_eq!(
        result.reply,
        "I couldn't find order #5. Please check the order number and try again."
    );

    // 2. The no-id listing degrades to the id prompt.
    let result = engine.process_message(DialogueContext {
        message: "track my order",
        user: Some(1),
        cart: None,
    });
    assert_eq!(result.reply, "Please provide your order ID so I can track it for you.");

    // 3. Product lookup degrades to the not-in-inventory wording.
    let mut cart = Cart::new();
    let result = engine.process_message(DialogueContext {
        message: "buy idli mix",
        user: Some(1),
        cart: Some(&mut cart),
    });
    assert_eq!(
        result.reply,
        "I couldn't find idli Mix in our inventory. Would you like to see our available products?"
    );

    // 4. Recommendations degrade to the empty-history wording.
    let result = engine.process_message(DialogueContext {
        message: "what do you recommend",
        user: Some(1),
        cart: None,
    });
    assert_eq!(
        result.reply,
        "I don't have enough information to make recommendations yet. Try exploring our product catalog!"
    );
}
