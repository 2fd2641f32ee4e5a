//! Stock-update form: its displayed state and local validation.

use core::fmt;

use thiserror::Error;

use stockdesk_core::{MovementType, PartId, StockItem};

use crate::screen::Notification;

/// Raw values as entered in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdateInput {
    pub part: Option<PartId>,
    pub movement: MovementType,
    /// Quantity as typed; validated here, not by the caller.
    pub quantity: String,
}

/// Form input that passed validation and may be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub part: PartId,
    pub movement: MovementType,
    pub quantity: u64,
}

/// Local rejection. Never reaches the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockFormError {
    #[error("Please select a valid part and enter a quantity.")]
    InvalidSelection,

    #[error("Not enough stock for this exit!")]
    InsufficientStock { requested: u64, available: u64 },
}

/// Check the form against the cached stock list.
pub fn validate(
    input: &StockUpdateInput,
    stock: &[StockItem],
) -> Result<ValidatedUpdate, StockFormError> {
    let quantity = parse_quantity(&input.quantity);

    let item = input
        .part
        .as_ref()
        .and_then(|id| stock.iter().find(|p| &p.id == id));

    let (Some(item), Some(quantity)) = (item, quantity) else {
        return Err(StockFormError::InvalidSelection);
    };

    if input.movement == MovementType::Exit && quantity > item.quantity {
        return Err(StockFormError::InsufficientStock {
            requested: quantity,
            available: item.quantity,
        });
    }

    Ok(ValidatedUpdate {
        part: item.id.clone(),
        movement: input.movement,
        quantity,
    })
}

/// Positive integer made of ASCII digits only; no sign, no fraction.
fn parse_quantity(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok().filter(|q| *q > 0)
}

/// One `<option>` of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOption {
    pub value: String,
    pub label: String,
}

/// What the form shows: selectors, the quantity field, and its notice area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockFormView {
    pub parts: Vec<FormOption>,
    pub movements: Vec<FormOption>,
    pub min_quantity: u64,
    pub notice: Option<Notification>,
}

impl StockFormView {
    pub fn build(stock: &[StockItem]) -> Self {
        Self {
            parts: stock
                .iter()
                .map(|p| FormOption {
                    value: p.id.to_string(),
                    label: p.option_label(),
                })
                .collect(),
            movements: MovementType::ALL
                .iter()
                .map(|m| FormOption {
                    value: m.as_str().to_string(),
                    label: m.label().to_string(),
                })
                .collect(),
            min_quantity: 1,
            notice: None,
        }
    }

    /// Update the option label of `item` after its quantity changed.
    pub fn refresh_part(&mut self, item: &StockItem) {
        let value = item.id.to_string();
        for option in self.parts.iter_mut().filter(|o| o.value == value) {
            option.label = item.option_label();
        }
    }
}

impl fmt::Display for StockFormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Select part:")?;
        for option in &self.parts {
            writeln!(f, "  [{}] {}", option.value, option.label)?;
        }
        writeln!(f, "Movement type:")?;
        for option in &self.movements {
            writeln!(f, "  [{}] {}", option.value, option.label)?;
        }
        writeln!(f, "Quantity: (min {})", self.min_quantity)
    }
}
