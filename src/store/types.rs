use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::{OrderId, ProductId};

/// Orders older than this can no longer be cancelled through chat.
pub const CANCELLATION_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

/// One row of an order listing, enough to render "Order #3: pending, Total: ...".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Full view of a single order. `items` is the pre-rolled display string,
/// e.g. "Idli Mix (x2), Dosa Mix (x1)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: f64,
    pub items: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelEligibility {
    Eligible,
    AlreadyCancelled,
    Expired,
}

/// Result of an attempted cancellation write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    NotFound,
    AlreadyCancelled,
    Expired,
}

/// The single cancellation rule. Both the advisory reply and the write path
/// call this, so the two can never disagree. Status is checked before age:
/// a cancelled order reports AlreadyCancelled no matter how old it is.
/// An order expires when it is strictly older than the window.
pub fn cancellation_eligibility(
    status: OrderStatus,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CancelEligibility {
    if status == OrderStatus::Cancelled {
        return CancelEligibility::AlreadyCancelled;
    }
    if now - created_at > Duration::hours(CANCELLATION_WINDOW_HOURS) {
        return CancelEligibility::Expired;
    }
    CancelEligibility::Eligible
}
