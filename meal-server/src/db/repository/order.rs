//! Order Repository
//!
//! Flat order map keyed by [`OrderKey`]. Keys that do not parse are kept in
//! the file but skipped by scans.

use chrono::NaiveDate;
use shared::models::{MealOrder, OrderKey};

use crate::db::{Database, OrderMap};
use crate::utils::AppResult;

#[derive(Clone)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn find(&self, key: &OrderKey) -> Option<MealOrder> {
        self.db.orders.load().remove(&key.to_string())
    }

    /// Insert or overwrite the order at `key`
    pub fn upsert(&self, key: &OrderKey, order: MealOrder) -> AppResult<()> {
        self.db.orders.update(|orders| {
            orders.insert(key.to_string(), order);
            Ok(())
        })
    }

    /// Remove the order at `key`, returning it if it existed
    pub fn remove(&self, key: &OrderKey) -> AppResult<Option<MealOrder>> {
        let raw = key.to_string();
        self.db.orders.update(|orders| Ok(orders.remove(&raw)))
    }

    /// Mutate the order at `key` in place; `None` when absent
    pub fn modify(
        &self,
        key: &OrderKey,
        f: impl FnOnce(&mut MealOrder),
    ) -> AppResult<Option<MealOrder>> {
        let raw = key.to_string();
        self.db.orders.update(|orders| {
            Ok(orders.get_mut(&raw).map(|order| {
                f(order);
                order.clone()
            }))
        })
    }

    /// All parsable orders, in key order
    pub fn find_all(&self) -> Vec<(OrderKey, MealOrder)> {
        parse_entries(self.db.orders.load())
    }

    /// Orders whose date is within `from..=to`
    pub fn find_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<(OrderKey, MealOrder)> {
        if from > to {
            return Vec::new();
        }
        self.find_all()
            .into_iter()
            .filter(|(key, _)| key.date >= from && key.date <= to)
            .collect()
    }
}

fn parse_entries(orders: OrderMap) -> Vec<(OrderKey, MealOrder)> {
    orders
        .into_entries()
        .into_iter()
        .filter_map(|(raw, order)| match raw.parse::<OrderKey>() {
            Ok(key) => Some((key, order)),
            Err(e) => {
                tracing::warn!(key = %raw, error = %e, "Skipping order with malformed key");
                None
            }
        })
        .collect()
}
