//! The six navigable sections of the main view.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    StockList,
    SupplyPlan,
    LogisticsPlan,
    ProductionReport,
    StockUpdate,
    RequiredParts,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown section {0:?}")]
pub struct UnknownSection(pub String);

impl Section {
    pub const ALL: [Section; 6] = [
        Section::StockList,
        Section::SupplyPlan,
        Section::LogisticsPlan,
        Section::ProductionReport,
        Section::StockUpdate,
        Section::RequiredParts,
    ];

    /// Name used by navigation.
    pub fn name(&self) -> &'static str {
        match self {
            Section::StockList => "stock",
            Section::SupplyPlan => "supply",
            Section::LogisticsPlan => "logistics",
            Section::ProductionReport => "reports",
            Section::StockUpdate => "stock-update",
            Section::RequiredParts => "required-parts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::StockList => "Stock Tracking",
            Section::SupplyPlan => "Supply Planning",
            Section::LogisticsPlan => "Logistics Planning",
            Section::ProductionReport => "Production Reports",
            Section::StockUpdate => "Stock Update",
            Section::RequiredParts => "Parts Required in Production",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.name() == wanted)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
