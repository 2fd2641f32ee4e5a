//! Records mirrored from the backend.
//!
//! These carry no client-side invariants beyond their types; the backend owns
//! them. Field names match the backend's JSON.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::PartId;

/// A part held in stock.
///
/// Reads `id` or `_id`, and `quantity` or `current_stock`. When a record
/// carries both spellings the first one wins and the other is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStockItem")]
pub struct StockItem {
    pub id: PartId,
    pub name: String,
    pub quantity: u64,
}

#[derive(Deserialize)]
struct RawStockItem {
    id: Option<PartId>,
    _id: Option<PartId>,
    name: String,
    quantity: Option<u64>,
    current_stock: Option<u64>,
}

impl TryFrom<RawStockItem> for StockItem {
    type Error = DomainError;

    fn try_from(raw: RawStockItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw
                .id
                .or(raw._id)
                .ok_or_else(|| DomainError::validation("missing field `id`"))?,
            name: raw.name,
            quantity: raw
                .quantity
                .or(raw.current_stock)
                .ok_or_else(|| DomainError::validation("missing field `quantity`"))?,
        })
    }
}

/// A part the supply plan still has to procure.
///
/// The id is read from `id`, then `_id`, then `part_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSupplyPlanEntry")]
pub struct SupplyPlanEntry {
    pub id: PartId,
    pub name: String,
    pub missing_quantity: u64,
    pub planned_delivery_date: String,
}

#[derive(Deserialize)]
struct RawSupplyPlanEntry {
    id: Option<PartId>,
    _id: Option<PartId>,
    part_id: Option<PartId>,
    name: String,
    missing_quantity: u64,
    planned_delivery_date: String,
}

impl TryFrom<RawSupplyPlanEntry> for SupplyPlanEntry {
    type Error = DomainError;

    fn try_from(raw: RawSupplyPlanEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw
                .id
                .or(raw._id)
                .or(raw.part_id)
                .ok_or_else(|| DomainError::validation("missing field `id`"))?,
            name: raw.name,
            missing_quantity: raw.missing_quantity,
            planned_delivery_date: raw.planned_delivery_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsPlanEntry {
    pub product_name: String,
    pub quantity: u64,
    pub delivery_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionReportEntry {
    pub product_name: String,
    pub quantity: u64,
    pub delivery_date: String,
}

/// A part a product needs for production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredPartEntry {
    pub product_name: String,
    pub part_id: PartId,
    pub part_name: String,
    pub required_quantity: u64,
}

impl StockItem {
    /// Label shown in the stock-update part selector.
    pub fn option_label(&self) -> String {
        format!("{} (Stock: {})", self.name, self.quantity)
    }
}
