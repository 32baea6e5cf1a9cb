//! Order Service
//!
//! Loads the pricing inputs from an [`OrderStore`], runs the calculator and,
//! for new orders, persists the result. Upstream lookup failures surface as
//! [`OrderError::DataUnavailable`]; a discount is never guessed.

use shared::error::{AppError, ErrorCode};
use shared::models::{CreateOrderRequest, DrinkSelection, OrderWithDrinks, PriceBreakdown};
use thiserror::Error;

use super::providers::{NewOrder, OrderStore, PickupDetails};
use crate::error::BoxError;
use crate::pricing::{self, PricingError};

/// Order service errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Pick up location and time are required")]
    PickupRequired,

    #[error("Invalid pick up time: {0}")]
    InvalidPickupTime(String),

    #[error("Pricing data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(BoxError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Pricing(e) => e.into(),
            OrderError::PickupRequired => {
                AppError::with_message(ErrorCode::PickupDetailsRequired, err.to_string())
            }
            OrderError::InvalidPickupTime(ref value) => {
                AppError::with_message(ErrorCode::InvalidPickupTime, err.to_string())
                    .with_detail("pick_up_time", value.as_str())
            }
            OrderError::DataUnavailable(ref reason) => {
                tracing::error!(reason = %reason, "Pricing inputs could not be loaded");
                AppError::new(ErrorCode::PricingDataUnavailable)
            }
            OrderError::Storage(e) => {
                tracing::error!(error = %e, "Failed to store order");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

/// Price drinks for a user against current config, catalog and paid history.
pub async fn calculate<S>(
    store: &S,
    user_id: i64,
    drinks: &[DrinkSelection],
) -> Result<PriceBreakdown, OrderError>
where
    S: OrderStore + ?Sized,
{
    if drinks.is_empty() {
        return Err(PricingError::EmptyOrder.into());
    }

    let (config, catalog, history) = tokio::try_join!(
        async {
            store
                .shop_config()
                .await
                .map_err(|e| OrderError::DataUnavailable(format!("shop config: {e}")))?
                .ok_or_else(|| OrderError::DataUnavailable("shop config row is missing".into()))
        },
        async {
            store
                .catalog_snapshot()
                .await
                .map_err(|e| OrderError::DataUnavailable(format!("catalog: {e}")))
        },
        async {
            store
                .paid_orders(user_id)
                .await
                .map_err(|e| OrderError::DataUnavailable(format!("order history: {e}")))
        },
    )?;

    let breakdown = pricing::price_order(&config, &catalog, &history, drinks)?;

    tracing::debug!(
        user_id,
        drinks = drinks.len(),
        tier = breakdown.discount.tier,
        total = breakdown.total_amount,
        "Order priced"
    );

    Ok(breakdown)
}

/// Validate pickup details, price the drinks and store the order.
///
/// The stored amounts are exactly the calculator's output for the history
/// snapshot read here.
pub async fn create_order<S>(
    store: &S,
    user_id: i64,
    request: &CreateOrderRequest,
) -> Result<OrderWithDrinks, OrderError>
where
    S: OrderStore + ?Sized,
{
    if request.drinks.is_empty() {
        return Err(PricingError::EmptyOrder.into());
    }
    let pickup = parse_pickup(request)?;

    let breakdown = calculate(store, user_id, &request.drinks).await?;

    let order = store
        .insert_order(NewOrder {
            user_id,
            breakdown: &breakdown,
            pickup: &pickup,
            created_at: shared::util::now_millis(),
        })
        .await
        .map_err(OrderError::Storage)?;

    tracing::info!(
        order_id = order.order.id,
        user_id,
        total = order.order.total_amount,
        "Order created"
    );

    Ok(order)
}

fn parse_pickup(request: &CreateOrderRequest) -> Result<PickupDetails, OrderError> {
    let location = request
        .pick_up_location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(OrderError::PickupRequired)?;
    let raw_time = request
        .pick_up_time
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(OrderError::PickupRequired)?;
    let time = shared::util::parse_timestamp_millis(raw_time)
        .ok_or_else(|| OrderError::InvalidPickupTime(raw_time.to_string()))?;

    Ok(PickupDetails {
        location: location.to_string(),
        time,
    })
}
