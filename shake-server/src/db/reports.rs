//! Manager reports

use shared::models::{DayOfWeekReport, DayOfWeekVolume, WEEKDAY_NAMES};
use sqlx::PgPool;

/// Paid order and drink volume per UTC weekday
pub async fn day_of_week(pool: &PgPool) -> Result<DayOfWeekReport, sqlx::Error> {
    let rows: Vec<(i32, i64, i64)> = sqlx::query_as(
        r#"
        SELECT EXTRACT(DOW FROM to_timestamp(o.created_at / 1000.0) AT TIME ZONE 'UTC')::INT AS dow,
               COUNT(DISTINCT o.id) AS orders,
               COUNT(d.id) AS drinks
        FROM orders o
        LEFT JOIN order_drinks d ON d.order_id = o.id
        WHERE o.is_paid
        GROUP BY dow
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(build_report(&rows))
}

/// Fill all seven days (Sunday first) from sparse `(dow, orders, drinks)` rows
pub fn build_report(rows: &[(i32, i64, i64)]) -> DayOfWeekReport {
    let mut days: Vec<DayOfWeekVolume> = WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| DayOfWeekVolume {
            day_index: i as u8,
            day: (*name).to_string(),
            orders: 0,
            drinks: 0,
        })
        .collect();

    for &(dow, orders, drinks) in rows {
        if let Some(day) = usize::try_from(dow).ok().and_then(|i| days.get_mut(i)) {
            day.orders += orders;
            day.drinks += drinks;
        }
    }

    DayOfWeekReport {
        total_orders: days.iter().map(|d| d.orders).sum(),
        total_drinks: days.iter().map(|d| d.drinks).sum(),
        days,
    }
}
