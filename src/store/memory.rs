use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

use crate::intent::{OrderId, ProductId, UserId};
use crate::store::commerce::{CommerceStore, StoreError};
use crate::store::types::{
    cancellation_eligibility, CancelEligibility, CancelOutcome, OrderDetails, OrderStatus,
    OrderSummary, Product,
};

/// The stock catalog of instant-food mixes.
const CATALOG: [(&str, f64); 13] = [
    ("Idli Mix", 50.00),
    ("Dosa Mix", 60.00),
    ("Upma Mix", 40.00),
    ("Poha Mix", 55.00),
    ("Pancake Mix", 150.00),
    ("Cake Mix", 120.00),
    ("Vanilla Cake Mix", 120.00),
    ("Strawberry Cake Mix", 120.00),
    ("Thandai Mix", 100.00),
    ("Badam Milk Mix", 80.00),
    ("Chutney Mix", 70.00),
    ("Sambar Mix", 90.00),
    ("Rasam Mix", 85.00),
];

struct OrderRecord {
    id: OrderId,
    user: UserId,
    status: OrderStatus,
    total: f64,
    lines: Vec<(ProductId, u32)>,
    created_at: DateTime<Utc>,
}

/// In-process `CommerceStore` backed by a plain Vec behind a lock. Holds the
/// product catalog immutably and appends orders as they are placed.
pub struct MemoryStore {
    products: Vec<Product>,
    orders: RwLock<Vec<OrderRecord>>,
}

impl MemoryStore {
    /// Store pre-loaded with the stock catalog, ids assigned in order.
    pub fn with_catalog() -> Self {
        let products = CATALOG
            .iter()
            .enumerate()
            .map(|(i, (name, price))| Product {
                id: i as ProductId + 1,
                name: (*name).to_string(),
                price: *price,
            })
            .collect();
        Self::with_products(products)
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            orders: RwLock::new(Vec::new()),
        }
    }

    /// Records an order and returns its id. The total is priced from the
    /// catalog; lines naming unknown products contribute nothing to it.
    pub fn add_order(
        &self,
        user: UserId,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        items: &[(ProductId, u32)],
    ) -> Result<OrderId, StoreError> {
        let mut total = 0.0;
        for (product_id, qty) in items {
            if let Some(product) = self.products.iter().find(|p| p.id == *product_id) {
                total += product.price * f64::from(*qty);
            }
        }

        let mut orders = self.orders.write().map_err(|_| StoreError::Poisoned)?;
        // Orders are append-only, so length + 1 never collides.
        let id = orders.len() as OrderId + 1;
        orders.push(OrderRecord {
            id,
            user,
            status,
            total,
            lines: items.to_vec(),
            created_at,
        });
        Ok(id)
    }

    fn item_summary(&self, lines: &[(ProductId, u32)]) -> String {
        lines
            .iter()
            .filter_map(|(product_id, qty)| {
                self.products
                    .iter()
                    .find(|p| p.id == *product_id)
                    .map(|p| format!("{} (x{})", p.name, qty))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl CommerceStore for MemoryStore {
    fn find_product(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let needle = name.to_lowercase();
        Ok(self
            .products
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle))
            .cloned())
    }

    fn order_details(
        &self,
        order: OrderId,
        user: UserId,
    ) -> Result<Option<OrderDetails>, StoreError> {
        let orders = self.orders.read().map_err(|_| StoreError::Poisoned)?;
        Ok(orders
            .iter()
            .find(|o| o.id == order && o.user == user)
            .map(|o| OrderDetails {
                id: o.id,
                status: o.status,
                total: o.total,
                items: self.item_summary(&o.lines),
                created_at: o.created_at,
            }))
    }

    fn recent_orders(&self, user: UserId, limit: usize) -> Result<Vec<OrderSummary>, StoreError> {
        let orders = self.orders.read().map_err(|_| StoreError::Poisoned)?;
        let mut summaries: Vec<OrderSummary> = orders
            .iter()
            .filter(|o| o.user == user)
            .map(|o| OrderSummary {
                id: o.id,
                status: o.status,
                total: o.total,
                created_at: o.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(limit);
        Ok(summaries)
    }

    fn recommend_products(&self, user: UserId, limit: usize) -> Result<Vec<Product>, StoreError> {
        let orders = self.orders.read().map_err(|_| StoreError::Poisoned)?;
        let mut ordered: Vec<ProductId> = Vec::new();
        for record in orders.iter().filter(|o| o.user == user) {
            for (product_id, _) in &record.lines {
                if !ordered.contains(product_id) {
                    ordered.push(*product_id);
                }
            }
        }
        // Only the first three distinct previously-ordered products are
        // excluded from the pool.
        ordered.truncate(3);

        let pool: Vec<&Product> = if ordered.is_empty() {
            self.products.iter().collect()
        } else {
            self.products
                .iter()
                .filter(|p| !ordered.contains(&p.id))
                .collect()
        };

        let mut rng = rand::thread_rng();
        Ok(pool
            .choose_multiple(&mut rng, limit)
            .map(|p| (*p).clone())
            .collect())
    }

    fn cancel_order(&self, order: OrderId, user: UserId) -> Result<CancelOutcome, StoreError> {
        let mut orders = self.orders.write().map_err(|_| StoreError::Poisoned)?;
        match orders.iter_mut().find(|o| o.id == order && o.user == user) {
            Some(record) => {
                match cancellation_eligibility(record.status, record.created_at, Utc::now()) {
                    CancelEligibility::AlreadyCancelled => Ok(CancelOutcome::AlreadyCancelled),
                    CancelEligibility::Expired => Ok(CancelOutcome::Expired),
                    CancelEligibility::Eligible => {
                        record.status = OrderStatus::Cancelled;
                        Ok(CancelOutcome::Cancelled)
                    }
                }
            }
            None => Ok(CancelOutcome::NotFound),
        }
    }
}
