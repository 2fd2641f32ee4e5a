//! `stockdesk-core`: records mirrored from the inventory backend.
//!
//! This crate contains **pure data** primitives (no HTTP, no storage).

pub mod error;
pub mod id;
pub mod model;
pub mod movement;

pub use error::{DomainError, DomainResult};
pub use id::{PartId, WarehouseId};
pub use model::{
    LogisticsPlanEntry, ProductionReportEntry, RequiredPartEntry, StockItem, SupplyPlanEntry,
};
pub use movement::MovementType;
