//! Client-side application state.
//!
//! Every list is owned by the render routine that fetches it and is replaced
//! wholesale on each fetch. The stock list is the one exception: a successful
//! stock update adjusts a cached quantity in place.

use stockdesk_core::{
    LogisticsPlanEntry, PartId, ProductionReportEntry, RequiredPartEntry, StockItem,
    SupplyPlanEntry,
};

use crate::section::Section;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppState {
    pub stock: Vec<StockItem>,
    pub supply_plan: Vec<SupplyPlanEntry>,
    pub logistics_plan: Vec<LogisticsPlanEntry>,
    pub production_reports: Vec<ProductionReportEntry>,
    pub required_parts: Vec<RequiredPartEntry>,
    /// Section highlighted in navigation, if any.
    pub active: Option<Section>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(&self, id: &PartId) -> Option<&StockItem> {
        self.stock.iter().find(|p| &p.id == id)
    }

    pub fn part_mut(&mut self, id: &PartId) -> Option<&mut StockItem> {
        self.stock.iter_mut().find(|p| &p.id == id)
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == Some(section)
    }
}
