use std::fmt;

use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ProductId = i64;
pub type OrderId = i64;

/// Classified purpose of one user message. Produced per message, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    /// Put a product in the cart.
    OrderPlacement,
    /// Ask where an existing order is.
    OrderTracking,
    /// Ask to undo an existing order.
    OrderCancellation,
    /// Ask what else to buy.
    ProductRecommendation,
    Help,
    Goodbye,
    /// Nothing matched; the engine falls back to clarification.
    Unknown,
}

impl Intent {
    /// The classifiable intents in scoring order. The order doubles as the
    /// tie-break rule: on equal keyword scores the earlier entry stands.
    pub const ORDERED: [Intent; 7] = [
        Intent::Greeting,
        Intent::OrderPlacement,
        Intent::OrderTracking,
        Intent::OrderCancellation,
        Intent::ProductRecommendation,
        Intent::Help,
        Intent::Goodbye,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::OrderPlacement => "order_placement",
            Intent::OrderTracking => "order_tracking",
            Intent::OrderCancellation => "order_cancellation",
            Intent::ProductRecommendation => "product_recommendation",
            Intent::Help => "help",
            Intent::Goodbye => "goodbye",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::Unknown
    }
}
