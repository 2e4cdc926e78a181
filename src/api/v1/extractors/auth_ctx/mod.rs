/*!
 * Authenticated-context extractor
 *
 * Responsibility:
 * - Provide handlers with the context of a gated request (AuthCtx)
 * - HTTP / axum specifics stay in core; the type contract lives in types
 *
 * Public API:
 * - AuthCtx
 * - Gated
 */

mod core;
mod types;

pub use core::Gated;
pub use types::AuthCtx;
