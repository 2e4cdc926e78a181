/*
 * Responsibility
 * - Warehouse record request/response DTOs and the report query shape
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::order_repo::OrderRow;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub reference: String,
    pub party_name: String,
    pub item_description: String,
    pub quantity: i64,
    pub remarks: Option<String>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.reference.trim().is_empty() {
            return Err("reference is required");
        }
        if self.party_name.trim().is_empty() {
            return Err("party_name is required");
        }
        if self.item_description.trim().is_empty() {
            return Err("item_description is required");
        }
        if self.quantity <= 0 {
            return Err("quantity must be positive");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
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

impl From<OrderRow> for OrderResponse {
    fn from(row: OrderRow) -> Self {
        Self {
            order_id: row.order_id,
            category: row.category,
            reference: row.reference,
            party_name: row.party_name,
            item_description: row.item_description,
            quantity: row.quantity,
            remarks: row.remarks,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DashboardResponse {
    pub inward: i64,
    pub outward: i64,
    pub release_orders: i64,
    pub delivery_orders: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
