//! Strongly-typed identifiers used across the client.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Identifier of a part / product, owned by the backend.
///
/// The backend sends it either as a JSON string (document ids) or as a JSON
/// integer; both land here as text. It is always serialized back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PartId(String);

/// Identifier of a warehouse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(u32);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for PartId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for PartId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("PartId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for PartId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PartIdVisitor;

        impl Visitor<'_> for PartIdVisitor {
            type Value = PartId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a part id as string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PartId, E> {
                Ok(PartId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PartId, E> {
                Ok(PartId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PartId, E> {
                Ok(PartId(v.to_string()))
            }
        }

        deserializer.deserialize_any(PartIdVisitor)
    }
}

impl WarehouseId {
    /// Warehouse used by the stock-update form.
    pub const DEFAULT: WarehouseId = WarehouseId(1);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for WarehouseId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for WarehouseId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("WarehouseId: {e}")))
    }
}
