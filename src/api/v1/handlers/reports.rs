/*
 * Responsibility
 * - GET /reports: filtered record listing across categories (checker/admin)
 */
use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::v1::dto::orders::{OrderResponse, ReportQuery};
use crate::api::v1::extractors::Gated;
use crate::error::AppError;
use crate::repos::order_repo::{self, OrderCategory};
use crate::state::AppState;

pub async fn report(
    Gated(_): Gated,
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let category = match query.category.as_deref() {
        None => None,
        Some(raw) => Some(OrderCategory::from_str_opt(raw).ok_or_else(|| {
            AppError::bad_request("UNKNOWN_CATEGORY", "unrecognized record category")
        })?),
    };

    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::bad_request(
                "INVALID_RANGE",
                "from must not be after to",
            ));
        }
    }

    let rows = order_repo::report(&state.db, category, query.from, query.to).await?;
    Ok(Json(rows.into_iter().map(OrderResponse::from).collect()))
}
