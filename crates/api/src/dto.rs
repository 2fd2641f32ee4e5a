use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockdesk_core::{
    LogisticsPlanEntry, MovementType, PartId, ProductionReportEntry, RequiredPartEntry, StockItem,
    SupplyPlanEntry, WarehouseId,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStockRequest {
    pub product_id: PartId,
    pub warehouse_id: WarehouseId,
    pub quantity: u64,
    pub movement_type: MovementType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckPartStatusRequest {
    pub product_id: PartId,
    pub required_quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcureMissingPartsRequest {
    pub product_id: PartId,
    pub missing_quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanLogisticsRequest {
    pub product_id: PartId,
    pub quantity: u64,
    pub delivery_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverToProductionRequest {
    pub product_id: PartId,
    pub warehouse_id: WarehouseId,
    pub quantity: u64,
}

impl UpdateStockRequest {
    /// Request with the form's defaults: default warehouse, generated description.
    pub fn new(product_id: PartId, movement_type: MovementType, quantity: u64) -> Self {
        Self {
            product_id,
            warehouse_id: WarehouseId::DEFAULT,
            quantity,
            movement_type,
            description: format!("{} operation", movement_type.as_str().to_lowercase()),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A list endpoint answers either with an object wrapping the list under an
/// endpoint-specific key, or with the bare list. Nothing else is accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<W, T> {
    Wrapped(W),
    Bare(Vec<T>),
}

/// Object form of a list response.
pub(crate) trait Envelope {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

impl<W, T> Listing<W, T>
where
    W: Envelope<Item = T>,
{
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Listing::Wrapped(w) => w.into_items(),
            Listing::Bare(items) => items,
        }
    }
}

macro_rules! envelope {
    ($name:ident, $key:ident, $item:ty) => {
        #[derive(Debug, Deserialize)]
        pub(crate) struct $name {
            $key: Vec<$item>,
        }

        impl Envelope for $name {
            type Item = $item;

            fn into_items(self) -> Vec<$item> {
                self.$key
            }
        }
    };
}

envelope!(ProductsEnvelope, products, StockItem);
envelope!(SupplyEnvelope, items, SupplyPlanEntry);
envelope!(ReportsEnvelope, reports, ProductionReportEntry);
envelope!(PartsEnvelope, parts, RequiredPartEntry);
envelope!(PlansEnvelope, plans, LogisticsPlanEntry);
