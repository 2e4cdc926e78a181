/*
 * Responsibility
 * - SQLx operations for warehouse movement records (inward, outward,
 *   release orders, delivery orders)
 *
 * Expected schema:
 *   warehouse_orders(order_id uuid pk default gen_random_uuid(),
 *                    category text, reference text, party_name text,
 *                    item_description text, quantity bigint,
 *                    remarks text null, created_by uuid,
 *                    created_at timestamptz default now())
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// The four record categories the warehouse tracks. Stored as text; the set
/// is closed here so handlers cannot write arbitrary category strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCategory {
    Inward,
    Outward,
    ReleaseOrder,
    DeliveryOrder,
}

impl OrderCategory {
    pub const ALL: [OrderCategory; 4] = [
        OrderCategory::Inward,
        OrderCategory::Outward,
        OrderCategory::ReleaseOrder,
        OrderCategory::DeliveryOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderCategory::Inward => "inward",
            OrderCategory::Outward => "outward",
            OrderCategory::ReleaseOrder => "release_order",
            OrderCategory::DeliveryOrder => "delivery_order",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "inward" => Some(OrderCategory::Inward),
            "outward" => Some(OrderCategory::Outward),
            "release_order" => Some(OrderCategory::ReleaseOrder),
            "delivery_order" => Some(OrderCategory::DeliveryOrder),
            _ => None,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub order_id: Uuid,
    pub category: String,
    pub reference: String,
    pub party_name: String,
    pub item_description: String,
    pub quantity: i64,
    pub remarks: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool, category: OrderCategory) -> RepoResult<Vec<OrderRow>> {
    let rows = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT order_id, category, reference, party_name, item_description,
               quantity, remarks, created_by, created_at
        FROM warehouse_orders
        WHERE category = $1
        ORDER BY created_at DESC
        LIMIT 200
        "#,
    )
    .bind(category.as_str())
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    category: OrderCategory,
    reference: &str,
    party_name: &str,
    item_description: &str,
    quantity: i64,
    remarks: Option<&str>,
    created_by: Uuid,
) -> RepoResult<OrderRow> {
    let row = sqlx::query_as::<_, OrderRow>(
        r#"
        INSERT INTO warehouse_orders
            (category, reference, party_name, item_description, quantity, remarks, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING order_id, category, reference, party_name, item_description,
                  quantity, remarks, created_by, created_at
        "#,
    )
    .bind(category.as_str())
    .bind(reference)
    .bind(party_name)
    .bind(item_description)
    .bind(quantity)
    .bind(remarks)
    .bind(created_by)
    .fetch_one(db)
    .await?;

    Ok(row)
}

/// Report listing: optional category and date-range filters, newest first.
pub async fn report(
    db: &PgPool,
    category: Option<OrderCategory>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> RepoResult<Vec<OrderRow>> {
    let rows = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT order_id, category, reference, party_name, item_description,
               quantity, remarks, created_by, created_at
        FROM warehouse_orders
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::timestamptz IS NULL OR created_at >= $2)
          AND ($3::timestamptz IS NULL OR created_at <= $3)
        ORDER BY created_at DESC
        LIMIT 500
        "#,
    )
    .bind(category.map(|c| c.as_str()))
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Per-category record counts for the landing dashboard.
pub async fn counts_by_category(db: &PgPool) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT category, COUNT(*)
        FROM warehouse_orders
        GROUP BY category
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_strings_round_trip() {
        for c in OrderCategory::ALL {
            assert_eq!(OrderCategory::from_str_opt(c.as_str()), Some(c));
        }
        assert_eq!(OrderCategory::from_str_opt("unknown"), None);
    }
}
