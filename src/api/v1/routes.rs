/*
 * Responsibility
 * - v1 URL structure
 * - Which paths exist is decided here; which roles reach them is decided by
 *   the access policy table, enforced at the perimeter and in handlers
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, logout, me, register, validate},
    dashboard::dashboard,
    health::health,
    orders::{
        create_delivery_order, create_inward, create_outward, create_release_order,
        list_delivery_orders, list_inward, list_outward, list_release_orders,
    },
    reports::report,
    users::{approve_user, list_users, unlock_user},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/validate", post(validate))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/dashboard", get(dashboard))
        .route("/inward", get(list_inward).post(create_inward))
        .route("/outward", get(list_outward).post(create_outward))
        .route(
            "/release-orders",
            get(list_release_orders).post(create_release_order),
        )
        .route(
            "/delivery-orders",
            get(list_delivery_orders).post(create_delivery_order),
        )
        .route("/reports", get(report))
        .route("/users", get(list_users))
        .route("/users/{user_id}/approve", post(approve_user))
        .route("/users/{user_id}/unlock", post(unlock_user))
}
