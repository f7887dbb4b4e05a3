//! Human-readable stock report.

use std::collections::BTreeMap;

use stockkeep_core::{ItemName, Quantity};

const HEADER: &str = "--- Items Report ---";
const FOOTER: &str = "--------------------";

/// Borrowed view of the store rendered as a report:
///
/// ```text
/// --- Items Report ---
/// apple -> 5
/// banana -> 2
/// --------------------
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StockReport<'a> {
    items: &'a BTreeMap<ItemName, Quantity>,
}

impl<'a> StockReport<'a> {
    pub fn new(items: &'a BTreeMap<ItemName, Quantity>) -> Self {
        Self { items }
    }
}

impl core::fmt::Display for StockReport<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{HEADER}")?;
        if self.items.is_empty() {
            writeln!(f, "Inventory is empty.")?;
        } else {
            for (item, qty) in self.items {
                writeln!(f, "{item} -> {qty}")?;
            }
        }
        writeln!(f, "{FOOTER}")
    }
}
