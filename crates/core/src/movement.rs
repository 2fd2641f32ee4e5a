//! Direction of a stock change.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Stock movement direction, as the backend spells it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Parts coming into the warehouse.
    Entry,
    /// Parts leaving the warehouse (e.g. to production). Bounded by current stock.
    Exit,
}

impl MovementType {
    pub const ALL: [MovementType; 2] = [MovementType::Entry, MovementType::Exit];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entry => "ENTRY",
            MovementType::Exit => "EXIT",
        }
    }

    /// Human label used by the stock-update form.
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::Entry => "Part Entry",
            MovementType::Exit => "Part Exit (Production)",
        }
    }

    /// Quantity after moving `amount` parts in this direction.
    pub fn apply(&self, quantity: u64, amount: u64) -> DomainResult<u64> {
        match self {
            MovementType::Entry => quantity
                .checked_add(amount)
                .ok_or_else(|| DomainError::validation("quantity overflow")),
            MovementType::Exit => {
                quantity
                    .checked_sub(amount)
                    .ok_or(DomainError::InsufficientStock {
                        requested: amount,
                        available: quantity,
                    })
            }
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENTRY" => Ok(MovementType::Entry),
            "EXIT" => Ok(MovementType::Exit),
            other => Err(DomainError::validation(format!(
                "movement type must be ENTRY or EXIT, got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn entry_and_exit_from_ten() {
        assert_eq!(MovementType::Entry.apply(10, 5).unwrap(), 15);
        assert_eq!(MovementType::Exit.apply(10, 5).unwrap(), 5);
    }

    #[test]
    fn exit_beyond_stock_fails() {
        let err = MovementType::Exit.apply(3, 4).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 4,
                available: 3
            }
        );
    }

    #[test]
    fn parses_case_insensitively_and_serializes_uppercase() {
        assert_eq!("exit".parse::<MovementType>().unwrap(), MovementType::Exit);
        assert_eq!(" Entry ".parse::<MovementType>().unwrap(), MovementType::Entry);
        assert!("transfer".parse::<MovementType>().is_err());
        assert_eq!(
            serde_json::to_string(&MovementType::Entry).unwrap(),
            "\"ENTRY\""
        );
    }

    proptest! {
        #[test]
        fn exit_never_goes_negative(quantity in 0u64..10_000, amount in 0u64..10_000) {
            let result = MovementType::Exit.apply(quantity, amount);
            if amount > quantity {
                prop_assert!(result.is_err());
            } else {
                prop_assert_eq!(result.unwrap(), quantity - amount);
            }
        }

        #[test]
        fn entry_then_exit_restores(quantity in 0u64..10_000, amount in 0u64..10_000) {
            let up = MovementType::Entry.apply(quantity, amount).unwrap();
            prop_assert_eq!(MovementType::Exit.apply(up, amount).unwrap(), quantity);
        }
    }
}
