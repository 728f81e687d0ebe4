//! # Axum Helpers
//!
//! Shared web infrastructure for the catalog services.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//! - **[`shutdown`]**: Graceful shutdown signal handling

pub mod errors;
pub mod extractors;
pub mod shutdown;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export shutdown helpers
pub use shutdown::shutdown_signal;
