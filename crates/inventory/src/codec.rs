//! JSON stock document codec.
//!
//! On-disk format (UTF-8):
//! ```text
//! {
//!     "apple": 5,
//!     "banana": 2
//! }
//! ```
//! A single flat object, keys in ascending order, one record per line,
//! trailing newline. Decoding accepts any whitespace layout but nothing else:
//! no nested values, no fractional or negative quantities, no duplicate keys.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use stockkeep_core::{InventoryError, InventoryResult, ItemName, Quantity};

/// Decoded, fully validated item mapping.
pub type StockItems = BTreeMap<ItemName, Quantity>;

const INDENT: &[u8] = b"    ";

/// Serialize the mapping into a complete document.
pub fn encode(items: &StockItems) -> InventoryResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(16 + items.len() * 24);
    {
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        items
            .serialize(&mut ser)
            .map_err(|e| InventoryError::persistence(format!("failed to encode inventory: {e}")))?;
    }
    buf.push(b'\n');
    Ok(buf)
}

/// Parse and validate a document. Either every entry is valid or nothing is
/// returned.
pub fn decode(bytes: &[u8]) -> InventoryResult<StockItems> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| InventoryError::format(format!("document is not valid UTF-8: {e}")))?;
    let doc: StockDocument =
        serde_json::from_str(text).map_err(|e| InventoryError::format(e.to_string()))?;
    Ok(doc.0)
}

struct StockDocument(StockItems);

impl<'de> Deserialize<'de> for StockDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StockDocumentVisitor)
    }
}

struct StockDocumentVisitor;

impl<'de> Visitor<'de> for StockDocumentVisitor {
    type Value = StockDocument;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a flat object mapping item names to non-negative integer quantities")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut items = StockItems::new();

        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            let name = ItemName::new(key.as_str())
                .map_err(|_| <A::Error as de::Error>::custom(format!("invalid item name {key:?}")))?;
            let quantity = quantity_of(&key, &value).map_err(<A::Error as de::Error>::custom)?;

            if items.insert(name, quantity).is_some() {
                return Err(<A::Error as de::Error>::custom(format!(
                    "duplicate item {key:?}"
                )));
            }
        }

        Ok(StockDocument(items))
    }
}

fn quantity_of(key: &str, value: &Value) -> Result<Quantity, String> {
    match value {
        Value::Number(n) => {
            if let Some(q) = n.as_u64() {
                Ok(Quantity::new(q))
            } else if n.is_i64() {
                Err(format!("quantity for {key:?} is negative: {n}"))
            } else {
                Err(format!("quantity for {key:?} is not an integer: {n}"))
            }
        }
        other => Err(format!(
            "quantity for {key:?} must be an integer, got {}",
            json_kind(other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
