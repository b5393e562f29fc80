//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (one span per request: method, uri, status, latency)
//! 3. Request ID (record in span, echo in `x-request-id`)
//! 4. CORS allow-list (answers preflights)
//!
//! Bearer-token authentication is an extractor, not a layer: only the
//! handlers that take [`RequireAuth`] are protected.

pub mod auth;
pub mod cors;
pub mod request_id;

pub use auth::RequireAuth;
pub use cors::cors_layer;
pub use request_id::request_id_middleware;
