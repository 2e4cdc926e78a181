/*
 * Responsibility
 * - List/create handlers for the four warehouse record categories
 * - Which roles reach which category is decided by the access gate, not here;
 *   these handlers only run for requests the gate already allowed
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::api::v1::dto::orders::{CreateOrderRequest, OrderResponse};
use crate::api::v1::extractors::Gated;
use crate::error::AppError;
use crate::repos::order_repo::{self, OrderCategory};
use crate::state::AppState;

async fn list_category(
    state: &AppState,
    category: OrderCategory,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let rows = order_repo::list(&state.db, category).await?;
    Ok(Json(rows.into_iter().map(OrderResponse::from).collect()))
}

async fn create_in_category(
    state: &AppState,
    ctx: crate::api::v1::extractors::AuthCtx,
    category: OrderCategory,
    req: CreateOrderRequest,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_ORDER", m))?;

    let row = order_repo::create(
        &state.db,
        category,
        req.reference.trim(),
        req.party_name.trim(),
        req.item_description.trim(),
        req.quantity,
        req.remarks.as_deref(),
        ctx.identity.subject,
    )
    .await?;

    tracing::info!(
        category = category.as_str(),
        reference = %row.reference,
        created_by = %row.created_by,
        "warehouse record created"
    );
    Ok((StatusCode::CREATED, Json(OrderResponse::from(row))))
}

pub async fn list_inward(
    Gated(_): Gated,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    list_category(&state, OrderCategory::Inward).await
}

pub async fn create_inward(
    Gated(ctx): Gated,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    create_in_category(&state, ctx, OrderCategory::Inward, req).await
}

pub async fn list_outward(
    Gated(_): Gated,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    list_category(&state, OrderCategory::Outward).await
}

pub async fn create_outward(
    Gated(ctx): Gated,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    create_in_category(&state, ctx, OrderCategory::Outward, req).await
}

pub async fn list_release_orders(
    Gated(_): Gated,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    list_category(&state, OrderCategory::ReleaseOrder).await
}

pub async fn create_release_order(
    Gated(ctx): Gated,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    create_in_category(&state, ctx, OrderCategory::ReleaseOrder, req).await
}

pub async fn list_delivery_orders(
    Gated(_): Gated,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    list_category(&state, OrderCategory::DeliveryOrder).await
}

pub async fn create_delivery_order(
    Gated(ctx): Gated,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    create_in_category(&state, ctx, OrderCategory::DeliveryOrder, req).await
}
