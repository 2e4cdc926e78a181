/*
 * Responsibility
 * - v1 public surface (routes() re-export and the handler/DTO modules)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
