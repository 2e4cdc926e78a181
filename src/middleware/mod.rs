/*
 * Responsibility
 * - Public interface of the middleware stack (re-exports)
 */
pub mod cors;
pub mod http;
pub mod route_guard;
pub mod security_headers;
