use std::sync::LazyLock;

use regex::Regex;

use crate::intent::types::Intent;

/// Product-name matcher: a closed vocabulary of catalog stems, optionally
/// followed by the "mix" qualifier. Case-insensitive.
pub static PRODUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(idli|dosa|upma|poha|pancake|cake|vanilla|strawberry|thandai|badam|chutney|sambar|rasam)\s*(mix)?",
    )
    .unwrap()
});

/// Explicit order-id phrasing: "order", optional "id"/"number", optional '#',
/// then the digit run.
pub static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)order\s*(?:id|number)?\s*#?\s*(\d+)").unwrap());

/// Bare fallback: the first digit run anywhere, optionally prefixed by '#'.
pub static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#?(\d+)").unwrap());

/// Trigger phrases for one intent, in scoring order. Phrases are stored
/// lower-case because the classifier matches them against lower-cased text.
/// Matching is raw substring containment, so short triggers ("hi") hit
/// inside longer words; a known imprecision the scoring tolerates.
pub fn triggers(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Greeting => &[
            "hello",
            "hi",
            "hey",
            "greetings",
            "good morning",
            "good afternoon",
            "good evening",
        ],
        Intent::OrderPlacement => &[
            "order",
            "buy",
            "purchase",
            "add to cart",
            "checkout",
            "want to buy",
            "want to order",
        ],
        Intent::OrderTracking => &[
            "track",
            "status",
            "where is",
            "delivery status",
            "shipping status",
            "order status",
            "my order",
        ],
        Intent::OrderCancellation => &["cancel", "stop", "return", "refund", "don't want"],
        Intent::ProductRecommendation => &[
            "recommend",
            "suggestion",
            "similar",
            "like",
            "suggest",
            "what else",
            "more products",
        ],
        Intent::Help => &["help", "support", "assistance", "guide", "how to", "how do i"],
        Intent::Goodbye => &[
            "bye",
            "goodbye",
            "see you",
            "talk to you later",
            "thanks",
            "thank you",
        ],
        Intent::Unknown => &[],
    }
}
