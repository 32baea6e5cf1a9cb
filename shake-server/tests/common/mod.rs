//! In-memory order store for service-level tests

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use shake_server::error::BoxError;
use shake_server::pricing::{CatalogSnapshot, PaidOrder};
use shake_server::services::{
    CatalogProvider, ConfigProvider, NewOrder, OrderHistoryProvider, OrderPersistence,
    changes,
};
use shared::models::{
    AuditChange, CatalogItem, DrinkSelection, Order, OrderDrink, OrderWithDrinks, ShopConfig,
};

pub fn item(id: i64, name: &str, fee: f64) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        fee,
    }
}

pub fn drink(flavour_id: i64, topping_id: i64, consistency_id: i64) -> DrinkSelection {
    DrinkSelection {
        flavour_id,
        topping_id,
        consistency_id,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub config: Mutex<Option<ShopConfig>>,
    pub flavours: Vec<CatalogItem>,
    pub toppings: Vec<CatalogItem>,
    pub consistencies: Vec<CatalogItem>,
    /// (user_id, paid order)
    pub history: Mutex<Vec<(i64, PaidOrder)>>,
    pub orders: Mutex<Vec<OrderWithDrinks>>,
    pub audits: Mutex<Vec<(i64, AuditChange)>>,
    pub fail_config: AtomicBool,
    pub fail_history: AtomicBool,
}

impl MemoryStore {
    /// Default shop config with a small menu:
    /// flavours Vanilla 25 / Coffee 30, toppings Sprinkles 10 / None 0,
    /// consistencies Thick 15 / Milky 0.
    pub fn new() -> Self {
        Self {
            config: Mutex::new(Some(ShopConfig::default())),
            flavours: vec![item(1, "Vanilla", 25.0), item(2, "Coffee", 30.0)],
            toppings: vec![item(1, "Sprinkles", 10.0), item(2, "None", 0.0)],
            consistencies: vec![item(1, "Thick", 15.0), item(2, "Milky", 0.0)],
            ..Default::default()
        }
    }

    pub fn with_config(self, config: ShopConfig) -> Self {
        *self.config.lock().unwrap() = Some(config);
        self
    }

    pub fn add_paid_orders(&self, user_id: i64, drink_counts: &[i64]) {
        let mut history = self.history.lock().unwrap();
        for &drink_count in drink_counts {
            let order_id = history.len() as i64 + 1000;
            history.push((
                user_id,
                PaidOrder {
                    order_id,
                    drink_count,
                },
            ));
        }
    }

    pub fn stored_orders(&self) -> Vec<OrderWithDrinks> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigProvider for MemoryStore {
    async fn shop_config(&self) -> Result<Option<ShopConfig>, BoxError> {
        if self.fail_config.load(Ordering::SeqCst) {
            return Err("config lookup failed".into());
        }
        Ok(self.config.lock().unwrap().clone())
    }
}

#[async_trait]
impl OrderHistoryProvider for MemoryStore {
    async fn paid_orders(&self, user_id: i64) -> Result<Vec<PaidOrder>, BoxError> {
        if self.fail_history.load(Ordering::SeqCst) {
            return Err("history lookup failed".into());
        }
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, order)| *order)
            .collect())
    }
}

#[async_trait]
impl CatalogProvider for MemoryStore {
    async fn catalog_snapshot(&self) -> Result<CatalogSnapshot, BoxError> {
        Ok(CatalogSnapshot::new(
            self.flavours.clone(),
            self.toppings.clone(),
            self.consistencies.clone(),
        ))
    }
}

#[async_trait]
impl OrderPersistence for MemoryStore {
    async fn insert_order(&self, new_order: NewOrder<'_>) -> Result<OrderWithDrinks, BoxError> {
        let mut orders = self.orders.lock().unwrap();
        let id = orders.len() as i64 + 1;
        let b = new_order.breakdown;

        let order = Order {
            id,
            user_id: new_order.user_id,
            subtotal: b.subtotal,
            discount_percentage: b.discount.percentage,
            discount_amount: b.discount.amount,
            vat_amount: b.vat.amount,
            total_amount: b.total_amount,
            is_paid: false,
            pick_up_location: new_order.pickup.location.clone(),
            pick_up_time: new_order.pickup.time,
            created_at: new_order.created_at,
        };
        let drinks = b
            .drinks
            .iter()
            .enumerate()
            .map(|(i, d)| OrderDrink {
                id: i as i64 + 1,
                order_id: id,
                flavour_id: d.flavour_id,
                flavour_name: d.flavour_name.clone(),
                topping_id: d.topping_id,
                topping_name: d.topping_name.clone(),
                consistency_id: d.consistency_id,
                consistency_name: d.consistency_name.clone(),
                price: d.price,
            })
            .collect();

        self.audits
            .lock()
            .unwrap()
            .push((new_order.user_id, changes::order_created(order.id, order.total_amount)));

        let stored = OrderWithDrinks {
            order,
            drinks,
            user: None,
        };
        orders.push(stored.clone());
        Ok(stored)
    }
}
