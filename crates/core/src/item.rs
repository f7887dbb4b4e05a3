//! Validated item names and stock quantities.

use core::borrow::Borrow;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};
use crate::value_object::ValueObject;

/// Name of a stocked item.
///
/// Never empty and never whitespace-only. Compared and ordered by its text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl Into<String>) -> InventoryResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::validation(format!(
                "item name must be a non-empty string, got: {name:?}"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ItemName {}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ItemName {
    type Error = InventoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl FromStr for ItemName {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Stock quantity (always >= 0).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Accept a signed caller-supplied amount, rejecting negatives.
    pub fn from_signed(value: i64) -> InventoryResult<Self> {
        u64::try_from(value).map(Self).map_err(|_| {
            InventoryError::validation(format!("quantity cannot be negative, got: {value}"))
        })
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Quantity) -> InventoryResult<Self> {
        self.0.checked_add(other.0).map(Self).ok_or_else(|| {
            InventoryError::validation(format!(
                "quantity overflow: {} + {} exceeds {}",
                self.0,
                other.0,
                u64::MAX
            ))
        })
    }

    pub fn saturating_sub(self, other: Quantity) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl FromStr for Quantity {
    type Err = InventoryError;

    /// Parse a decimal integer. Anything else (fractions, words, expressions)
    /// is rejected rather than evaluated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Ok(Self(value));
        }
        match trimmed.parse::<i64>() {
            Ok(value) => Self::from_signed(value),
            Err(_) => Err(InventoryError::validation(format!(
                "quantity must be an integer, got: {s:?}"
            ))),
        }
    }
}
