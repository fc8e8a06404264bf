use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::intent::UserId;

/// Cart contents for one conversation, keyed by product id string.
/// Quantities are always >= 1; removing a product deletes the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: HashMap<String, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit and returns the new quantity for that product.
    pub fn add(&mut self, product_id: &str) -> u32 {
        let qty = self.items.entry(product_id.to_string()).or_insert(0);
        *qty += 1;
        *qty
    }

    pub fn quantity(&self, product_id: &str) -> Option<u32> {
        self.items.get(product_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Empties the cart. The dialogue engine never calls this; checkout
    /// handlers do once an order is placed.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Per-conversation state threaded through the chat surface: who is talking
/// (if anyone) and what they have picked so far.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<UserId>,
    pub cart: Cart,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user: UserId) -> Self {
        Self {
            user: Some(user),
            cart: Cart::new(),
        }
    }
}
