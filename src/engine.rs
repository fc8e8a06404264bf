use serde::{Deserialize, Serialize};

use crate::extract::EntityExtractor;
use crate::intent::{Intent, IntentClassifier, UserId};
use crate::session::Cart;
use crate::store::{
    cancellation_eligibility, CancelEligibility, CommerceStore, OrderDetails, OrderSummary,
    Product,
};

const GREETING_REPLY: &str = "Hello! How can I help you today? You can ask me about products, track your orders, or get recommendations.";
const GOODBYE_REPLY: &str =
    "Thank you for chatting! If you need anything else, I'm here to help.";
const HELP_REPLY: &str = "I can help you with: placing orders, tracking your orders, cancelling orders, and recommending products. What would you like to do?";

const RECENT_ORDERS_SHOWN: usize = 3;
const RECOMMENDATION_COUNT: usize = 3;

/// Page the caller should steer the user toward after this turn. The engine
/// itself never sets one; the chat surface layers these on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectHint {
    Checkout,
    Cart,
}

impl RedirectHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectHint::Checkout => "checkout",
            RedirectHint::Cart => "cart",
        }
    }
}

/// One turn's outcome: the reply text, an optional navigation hint, and the
/// intent that produced the reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueResult {
    pub reply: String,
    pub redirect_hint: Option<RedirectHint>,
    pub responded_intent: Intent,
}

/// Everything the engine needs for one turn. The cart is borrowed mutably
/// because order placement writes into it.
pub struct DialogueContext<'a> {
    pub message: &'a str,
    pub user: Option<UserId>,
    pub cart: Option<&'a mut Cart>,
}

/// Rule-based dialogue engine over a commerce store: classifies the message,
/// pulls out entities, and renders a reply from the store's view of the
/// world. Always produces a reply; store faults degrade to the miss wording
/// for the branch that hit them.
pub struct DialogueEngine<S: CommerceStore> {
    store: S,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
}

impl<S: CommerceStore> DialogueEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_classifier(store, IntentClassifier::new())
    }

    pub fn with_classifier(store: S, classifier: IntentClassifier) -> Self {
        Self {
            store,
            classifier,
            extractor: EntityExtractor::new(),
        }
    }

    /// The backing store, for callers that need to act outside a turn
    /// (explicit cancellation, seeding, checkout).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn process_message(&self, ctx: DialogueContext<'_>) -> DialogueResult {
        let DialogueContext { message, user, cart } = ctx;
        let intent = self.classifier.detect_intent(message);
        tracing::debug!("Detected intent {} for '{}'", intent, message);

        let reply = match intent {
            Intent::Greeting => GREETING_REPLY.to_string(),
            Intent::Goodbye => GOODBYE_REPLY.to_string(),
            Intent::Help => HELP_REPLY.to_string(),
            Intent::OrderPlacement => self.place_order(message, cart),
            Intent::OrderTracking => self.track_order(message, user),
            Intent::OrderCancellation => self.cancel_advice(message, user),
            Intent::ProductRecommendation => self.recommend(user),
            Intent::Unknown => self.clarify(message),
        };

        DialogueResult {
            reply,
            redirect_hint: None,
            responded_intent: intent,
        }
    }

    /// Status line for one of the user's orders, or the not-found wording
    /// when the id does not resolve for them.
    pub fn order_status_reply(&self, order_id: &str, user: UserId) -> String {
        match self.find_order(order_id, user) {
            Some(order) => format!(
                "Your order #{} is currently {}. The total amount is ₹{}. Items: {}",
                order_id, order.status, order.total, order.items
            ),
            None => format!(
                "I couldn't find order #{}. Please check the order number and try again.",
                order_id
            ),
        }
    }

    fn place_order(&self, message: &str, cart: Option<&mut Cart>) -> String {
        let product_name = match self.extractor.extract_product_name(message) {
            Some(name) => name,
            None => {
                return "What product would you like to order? We have Idli Mix, Dosa Mix, Upma Mix, and many more!".to_string();
            }
        };

        let product = match self.lookup_product(&product_name) {
            Some(product) => product,
            None => {
                return format!(
                    "I couldn't find {} in our inventory. Would you like to see our available products?",
                    product_name
                );
            }
        };

        match cart {
            Some(cart) => {
                cart.add(&product.id.to_string());
                format!(
                    "{} has been added to your cart. Would you like to proceed to checkout or continue shopping?",
                    product.name
                )
            }
            None => "Please log in to add products to your cart.".to_string(),
        }
    }

    fn track_order(&self, message: &str, user: Option<UserId>) -> String {
        let order_id = match self.extractor.extract_order_id(message) {
            Some(id) => id,
            None => {
                // No id given: show the recent orders so the user can pick one.
                if let Some(user) = user {
                    let recent = self.fetch_recent(user);
                    if !recent.is_empty() {
                        return format!(
                            "Here are your recent orders:\n{}\n\nWhich order would you like to track?",
                            Self::order_listing(&recent)
                        );
                    }
                }
                return "Please provide your order ID so I can track it for you.".to_string();
            }
        };

        let user = match user {
            Some(user) => user,
            None => return "Please log in to track your order.".to_string(),
        };

        self.order_status_reply(&order_id, user)
    }

    fn cancel_advice(&self, message: &str, user: Option<UserId>) -> String {
        let order_id = match self.extractor.extract_order_id(message) {
            Some(id) => id,
            None => {
                if let Some(user) = user {
                    let recent = self.fetch_recent(user);
                    if !recent.is_empty() {
                        return format!(
                            "Here are your recent orders:\n{}\n\nWhich order would you like to cancel?",
                            Self::order_listing(&recent)
                        );
                    }
                }
                return "Please provide your order ID so I can cancel it for you.".to_string();
            }
        };

        let user = match user {
            Some(user) => user,
            None => return "Please log in to cancel your order.".to_string(),
        };

        let order = match self.find_order(&order_id, user) {
            Some(order) => order,
            None => return "Order not found".to_string(),
        };

        match cancellation_eligibility(order.status, order.created_at, chrono::Utc::now()) {
            CancelEligibility::AlreadyCancelled => "Order is already cancelled".to_string(),
            CancelEligibility::Expired => {
                "Order cannot be cancelled as it's been more than 24 hours".to_string()
            }
            // Advisory only: the status flip happens behind
            // CommerceStore::cancel_order, driven by the chat surface.
            CancelEligibility::Eligible => format!(
                "I've initiated the cancellation for order #{}. You'll receive a refund soon.",
                order_id
            ),
        }
    }

    fn recommend(&self, user: Option<UserId>) -> String {
        let user = match user {
            Some(user) => user,
            None => return "Please log in to get personalized recommendations.".to_string(),
        };

        let picks = self.fetch_recommendations(user);
        if picks.is_empty() {
            return "I don't have enough information to make recommendations yet. Try exploring our product catalog!".to_string();
        }

        let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
        format!(
            "Based on your preferences, you might like: {}",
            names.join(", ")
        )
    }

    fn clarify(&self, message: &str) -> String {
        // A recognizable product in an otherwise unclassifiable message gets
        // a guided suggestion instead of the generic prompt.
        if let Some(name) = self.extractor.extract_product_name(message) {
            if let Some(product) = self.lookup_product(&name) {
                return format!(
                    "Are you looking to add {} to your cart? Please say 'add {} to cart' to proceed.",
                    product.name, product.name
                );
            }
        }
        "I'm not sure I understand. Would you like to place an order, track an order, or get product recommendations?".to_string()
    }

    fn order_listing(orders: &[OrderSummary]) -> String {
        orders
            .iter()
            .map(|o| format!("Order #{}: {}, Total: ₹{}", o.id, o.status, o.total))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // The helpers below downgrade store faults to the miss path so a reply
    // always comes back.

    fn lookup_product(&self, name: &str) -> Option<Product> {
        match self.store.find_product(name) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Product lookup failed for '{}': {}", name, e);
                None
            }
        }
    }

    fn find_order(&self, order_id: &str, user: UserId) -> Option<OrderDetails> {
        // Digit runs too large for an id cannot name a real order.
        let id = order_id.parse().ok()?;
        match self.store.order_details(id, user) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Order lookup failed for #{}: {}", order_id, e);
                None
            }
        }
    }

    fn fetch_recent(&self, user: UserId) -> Vec<OrderSummary> {
        match self.store.recent_orders(user, RECENT_ORDERS_SHOWN) {
            Ok(orders) => orders,
            Err(e) => {
                tracing::warn!("Recent order listing failed for user {}: {}", user, e);
                Vec::new()
            }
        }
    }

    fn fetch_recommendations(&self, user: UserId) -> Vec<Product> {
        match self.store.recommend_products(user, RECOMMENDATION_COUNT) {
            Ok(picks) => picks,
            Err(e) => {
                tracing::warn!("Recommendation lookup failed for user {}: {}", user, e);
                Vec::new()
            }
        }
    }
}
