//! PokeLens Gateway HTTP API Server
//!
//! Exposes the identification, upload, and recognition endpoints.

pub mod attachments;
pub mod error;
pub mod health_api;
pub mod identify;
pub mod recognize;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use identify::IdentificationResponse;
pub use recognize::RecognizeResponse;
pub use server::{build_router, start_server, GatewayState};
