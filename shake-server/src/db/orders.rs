//! Orders and order line items

use std::collections::HashMap;

use shared::models::{Order, OrderDrink, OrderOwner, OrderWithDrinks};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::pricing::PaidOrder;
use crate::services::NewOrder;

const ORDER_COLUMNS: &str = "o.id, o.user_id, o.subtotal, o.discount_percentage, o.discount_amount,
    o.vat_amount, o.total_amount, o.is_paid, o.pick_up_location, o.pick_up_time, o.created_at";

/// Order row joined with the ordering user
#[derive(sqlx::FromRow)]
struct OrderOwnerRow {
    #[sqlx(flatten)]
    order: Order,
    user_firstname: String,
    user_email: String,
}

impl OrderOwnerRow {
    fn split(self) -> (Order, OrderOwner) {
        let owner = OrderOwner {
            id: self.order.user_id,
            firstname: self.user_firstname,
            email: self.user_email,
        };
        (self.order, owner)
    }
}

/// Order list filters, already parsed
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub is_paid: Option<bool>,
}

/// Paid orders of a user with their drink counts
pub async fn paid_orders(pool: &PgPool, user_id: i64) -> Result<Vec<PaidOrder>, sqlx::Error> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT o.id, COUNT(d.id)
        FROM orders o
        LEFT JOIN order_drinks d ON d.order_id = o.id
        WHERE o.user_id = $1 AND o.is_paid
        GROUP BY o.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(order_id, drink_count)| PaidOrder {
            order_id,
            drink_count,
        })
        .collect())
}

/// Insert an order and its drinks (caller owns the transaction)
pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    new_order: &NewOrder<'_>,
) -> Result<Order, sqlx::Error> {
    let breakdown = new_order.breakdown;
    let order: Order = sqlx::query_as(
        r#"
        INSERT INTO orders (user_id, subtotal, discount_percentage, discount_amount, vat_amount,
                            total_amount, is_paid, pick_up_location, pick_up_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8, $9)
        RETURNING id, user_id, subtotal, discount_percentage, discount_amount, vat_amount,
                  total_amount, is_paid, pick_up_location, pick_up_time, created_at
        "#,
    )
    .bind(new_order.user_id)
    .bind(breakdown.subtotal)
    .bind(breakdown.discount.percentage)
    .bind(breakdown.discount.amount)
    .bind(breakdown.vat.amount)
    .bind(breakdown.total_amount)
    .bind(&new_order.pickup.location)
    .bind(new_order.pickup.time)
    .bind(new_order.created_at)
    .fetch_one(&mut **tx)
    .await?;

    for drink in &breakdown.drinks {
        sqlx::query(
            "INSERT INTO order_drinks (order_id, flavour_id, topping_id, consistency_id, price)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(order.id)
        .bind(drink.flavour_id)
        .bind(drink.topping_id)
        .bind(drink.consistency_id)
        .bind(drink.price)
        .execute(&mut **tx)
        .await?;
    }

    Ok(order)
}

/// Line items of the given orders, with catalog names
pub async fn drinks_for<'e>(
    executor: impl PgExecutor<'e>,
    order_ids: &[i64],
) -> Result<Vec<OrderDrink>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT d.id, d.order_id,
               d.flavour_id, f.name AS flavour_name,
               d.topping_id, t.name AS topping_name,
               d.consistency_id, c.name AS consistency_name,
               d.price
        FROM order_drinks d
        JOIN flavours f ON f.id = d.flavour_id
        JOIN toppings t ON t.id = d.topping_id
        JOIN consistencies c ON c.id = d.consistency_id
        WHERE d.order_id = ANY($1)
        ORDER BY d.order_id, d.id
        "#,
    )
    .bind(order_ids)
    .fetch_all(executor)
    .await
}

/// Attach drinks (and owners, when known) to orders, keeping order
async fn attach_drinks(
    pool: &PgPool,
    orders: Vec<(Order, Option<OrderOwner>)>,
) -> Result<Vec<OrderWithDrinks>, sqlx::Error> {
    let ids: Vec<i64> = orders.iter().map(|(o, _)| o.id).collect();
    let mut by_order: HashMap<i64, Vec<OrderDrink>> = HashMap::new();
    for drink in drinks_for(pool, &ids).await? {
        by_order.entry(drink.order_id).or_default().push(drink);
    }

    Ok(orders
        .into_iter()
        .map(|(order, user)| OrderWithDrinks {
            drinks: by_order.remove(&order.id).unwrap_or_default(),
            order,
            user,
        })
        .collect())
}

/// A user's own orders, newest first
pub async fn list_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<OrderWithDrinks>, sqlx::Error> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders o WHERE o.user_id = $1
         ORDER BY o.created_at DESC, o.id DESC"
    );
    let orders: Vec<Order> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;
    attach_drinks(pool, orders.into_iter().map(|o| (o, None)).collect()).await
}

/// All orders matching the filter, newest first, with owners
pub async fn list_all(
    pool: &PgPool,
    filter: &OrderFilter,
) -> Result<Vec<OrderWithDrinks>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {ORDER_COLUMNS}, u.firstname AS user_firstname, u.email AS user_email
        FROM orders o
        JOIN users u ON u.id = o.user_id
        WHERE ($1::BIGINT IS NULL OR o.created_at >= $1)
            AND ($2::BIGINT IS NULL OR o.created_at <= $2)
            AND ($3::BOOLEAN IS NULL OR o.is_paid = $3)
        ORDER BY o.created_at DESC, o.id DESC
        "#
    );
    let rows: Vec<OrderOwnerRow> = sqlx::query_as(&sql)
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.is_paid)
        .fetch_all(pool)
        .await?;
    attach_drinks(
        pool,
        rows.into_iter()
            .map(|row| {
                let (order, owner) = row.split();
                (order, Some(owner))
            })
            .collect(),
    )
    .await
}

/// One order with drinks and owner
pub async fn find_with_drinks(
    pool: &PgPool,
    order_id: i64,
) -> Result<Option<OrderWithDrinks>, sqlx::Error> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS}, u.firstname AS user_firstname, u.email AS user_email
         FROM orders o
         JOIN users u ON u.id = o.user_id
         WHERE o.id = $1"
    );
    let Some(row): Option<OrderOwnerRow> =
        sqlx::query_as(&sql).bind(order_id).fetch_optional(pool).await?
    else {
        return Ok(None);
    };
    let (order, owner) = row.split();
    let mut found = attach_drinks(pool, vec![(order, Some(owner))]).await?;
    Ok(found.pop())
}

/// Outcome of [`mark_paid`]
#[derive(Debug)]
pub enum MarkPaid {
    Paid(Order),
    AlreadyPaid,
    NotFound,
}

/// Flip `is_paid` on an unpaid order
pub async fn mark_paid(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i64,
) -> Result<MarkPaid, sqlx::Error> {
    let current: Option<(bool,)> =
        sqlx::query_as("SELECT is_paid FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await?;
    match current {
        None => return Ok(MarkPaid::NotFound),
        Some((true,)) => return Ok(MarkPaid::AlreadyPaid),
        Some((false,)) => {}
    }

    let sql = format!(
        "UPDATE orders o SET is_paid = TRUE WHERE o.id = $1 RETURNING {ORDER_COLUMNS}"
    );
    let order: Order = sqlx::query_as(&sql)
        .bind(order_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(MarkPaid::Paid(order))
}
