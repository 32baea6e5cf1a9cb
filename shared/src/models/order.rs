//! Order Models

use serde::{Deserialize, Serialize};

/// One requested drink (catalog ids)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrinkSelection {
    pub flavour_id: i64,
    pub topping_id: i64,
    pub consistency_id: i64,
}

/// Price-check payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculateOrderRequest {
    #[serde(default)]
    pub drinks: Vec<DrinkSelection>,
}

/// Order submission payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub drinks: Vec<DrinkSelection>,
    pub pick_up_location: Option<String>,
    /// RFC 3339 or `YYYY-MM-DDTHH:MM[:SS]` (UTC)
    pub pick_up_time: Option<String>,
}

/// Order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub subtotal: f64,
    pub discount_percentage: i32,
    pub discount_amount: f64,
    pub vat_amount: f64,
    pub total_amount: f64,
    pub is_paid: bool,
    pub pick_up_location: String,
    /// Unix millis
    pub pick_up_time: i64,
    pub created_at: i64,
}

/// Order line item with resolved item names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderDrink {
    pub id: i64,
    pub order_id: i64,
    pub flavour_id: i64,
    pub flavour_name: String,
    pub topping_id: i64,
    pub topping_name: String,
    pub consistency_id: i64,
    pub consistency_name: String,
    pub price: f64,
}

/// Who placed an order (manager listings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOwner {
    pub id: i64,
    pub firstname: String,
    pub email: String,
}

/// Order with its drinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithDrinks {
    #[serde(flatten)]
    pub order: Order,
    pub drinks: Vec<OrderDrink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<OrderOwner>,
}

/// Order list with count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderWithDrinks>,
    pub total_orders: usize,
}

/// Manager order list filters
///
/// Dates accept anything `util::parse_timestamp_millis` understands and are
/// inclusive bounds on `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(alias = "isPaid")]
    pub is_paid: Option<bool>,
}

// ==================== Price breakdown ====================

/// One priced drink in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkPrice {
    pub flavour_id: i64,
    pub flavour_name: String,
    pub topping_id: i64,
    pub topping_name: String,
    pub consistency_id: i64,
    pub consistency_name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSummary {
    pub percentage: i32,
    pub amount: f64,
    /// 0 when no tier applies
    pub tier: u8,
    /// Qualifying-order count of the winning tier (tier 1's count when none)
    pub qualifying_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatSummary {
    pub percentage: f64,
    pub amount: f64,
}

/// Itemised price for a set of drinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub drinks: Vec<DrinkPrice>,
    pub subtotal: f64,
    pub discount: DiscountSummary,
    pub subtotal_after_discount: f64,
    pub vat: VatSummary,
    pub total_amount: f64,
}
