//! `stockdesk-api`
//!
//! **Responsibility:** typed HTTP client for the inventory backend.
//!
//! - One async method per backend operation
//! - Bearer authorization on every call except login
//! - Response bodies validated against explicit schemas
//! - Single attempt per call (no retry, no timeout)

pub mod client;
pub mod dto;
pub mod error;

pub use client::ApiClient;
pub use dto::{
    CheckPartStatusRequest, DeliverToProductionRequest, MessageResponse, PlanLogisticsRequest,
    ProcureMissingPartsRequest, TokenResponse, UpdateStockRequest,
};
pub use error::{ApiError, ApiResult};

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
