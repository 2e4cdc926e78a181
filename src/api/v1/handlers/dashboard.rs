/*
 * Responsibility
 * - GET /dashboard: per-category record counts (the shared landing view)
 */
use axum::{Json, extract::State};

use crate::api::v1::dto::orders::DashboardResponse;
use crate::api::v1::extractors::Gated;
use crate::error::AppError;
use crate::repos::order_repo;
use crate::state::AppState;

pub async fn dashboard(
    Gated(_): Gated,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let counts = order_repo::counts_by_category(&state.db).await?;

    let mut out = DashboardResponse::default();
    for (category, count) in counts {
        match category.as_str() {
            "inward" => out.inward = count,
            "outward" => out.outward = count,
            "release_order" => out.release_orders = count,
            "delivery_order" => out.delivery_orders = count,
            other => tracing::warn!(category = other, "unrecognized category in counts"),
        }
    }

    Ok(Json(out))
}
