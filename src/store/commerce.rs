use thiserror::Error;

use crate::intent::{OrderId, UserId};
use crate::store::types::{CancelOutcome, OrderDetails, OrderSummary, Product};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Commerce data the dialogue engine reads, plus the one write it triggers.
/// Implementations decide where the data lives; the engine only cares about
/// these shapes.
pub trait CommerceStore {
    /// Case-insensitive substring match over product names; first hit in
    /// catalog order wins.
    fn find_product(&self, name: &str) -> Result<Option<Product>, StoreError>;

    /// Full view of one order, scoped to its owner. `None` when the order
    /// does not exist or belongs to someone else.
    fn order_details(&self, order: OrderId, user: UserId)
        -> Result<Option<OrderDetails>, StoreError>;

    /// Most recent orders first, at most `limit` of them.
    fn recent_orders(&self, user: UserId, limit: usize) -> Result<Vec<OrderSummary>, StoreError>;

    /// Products the user has not ordered yet, in random order. With no
    /// purchase history the pool is the whole catalog.
    fn recommend_products(&self, user: UserId, limit: usize) -> Result<Vec<Product>, StoreError>;

    /// The one write in the trait. Flips the order to cancelled only when
    /// `cancellation_eligibility` allows it.
    fn cancel_order(&self, order: OrderId, user: UserId) -> Result<CancelOutcome, StoreError>;
}
