// ABOUTME: HTTP middleware for request tracing, request IDs and CORS
// ABOUTME: Provides request ID generation, span creation, and the handler request context

/// CORS layer construction
pub mod cors;
/// Request ID generation and per-request tracing spans
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and context management
pub use tracing::{generate_request_id, make_request_span, MakeRequestUuid, RequestContext};
