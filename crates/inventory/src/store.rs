use std::collections::BTreeMap;

use tracing::Level;

use stockkeep_core::{InventoryError, InventoryResult, ItemName, Quantity};

use crate::codec::{self, StockItems};
use crate::persistence::DocumentStore;
use crate::report::StockReport;
use crate::sink::{LogSink, TracingSink};

/// Whether the store has been populated from a document.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreState {
    /// No successful `load` yet.
    Empty,
    /// Populated by a successful `load`.
    Loaded,
}

/// Owned inventory ledger: item name → non-negative quantity.
///
/// All mutations validate first and mutate second, so a failed call leaves
/// `items` exactly as it was. The store holds its log sink but never a
/// persistence handle; `load` and `save` borrow one for the duration of the
/// call.
#[derive(Debug)]
pub struct InventoryStore<L = TracingSink> {
    items: StockItems,
    state: StoreState,
    sink: L,
}

impl InventoryStore<TracingSink> {
    /// Create an empty store logging through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }
}

impl Default for InventoryStore<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LogSink> InventoryStore<L> {
    pub fn with_sink(sink: L) -> Self {
        Self {
            items: BTreeMap::new(),
            state: StoreState::Empty,
            sink,
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &BTreeMap<ItemName, Quantity> {
        &self.items
    }

    /// Items in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, Quantity)> {
        self.items.iter().map(|(name, qty)| (name, *qty))
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    pub fn into_sink(self) -> L {
        self.sink
    }

    /// Add `qty` units of `item`, creating the entry if needed.
    ///
    /// Returns the item's new quantity.
    pub fn add_item(&mut self, item: &str, qty: i64) -> InventoryResult<u64> {
        let name = ItemName::new(item)?;
        let qty = Quantity::from_signed(qty)?;
        self.add(name, qty).map(Quantity::get)
    }

    /// Typed form of [`add_item`](Self::add_item) for already-validated input.
    pub fn add(&mut self, item: ItemName, qty: Quantity) -> InventoryResult<Quantity> {
        let current = self.items.get(&item).copied().unwrap_or(Quantity::ZERO);
        let updated = current.checked_add(qty)?;

        self.sink
            .record(Level::INFO, &format!("added {qty} of {item} (now {updated})"));
        self.items.insert(item, updated);
        Ok(updated)
    }

    /// Remove up to `qty` units of `item`.
    ///
    /// Removing as much or more than is in stock drops the entry. Returns the
    /// remaining quantity (0 when dropped).
    pub fn remove_item(&mut self, item: &str, qty: i64) -> InventoryResult<u64> {
        let name = ItemName::new(item)?;
        let qty = Quantity::from_signed(qty)?;
        self.remove(&name, qty).map(Quantity::get)
    }

    /// Typed form of [`remove_item`](Self::remove_item).
    pub fn remove(&mut self, item: &ItemName, qty: Quantity) -> InventoryResult<Quantity> {
        let current = self
            .items
            .get(item)
            .copied()
            .ok_or_else(|| InventoryError::not_stocked(item.as_str()))?;

        let remaining = current.saturating_sub(qty);
        if remaining.is_zero() {
            self.items.remove(item);
            self.sink
                .record(Level::INFO, &format!("removed all stock of {item}"));
        } else {
            self.items.insert(item.clone(), remaining);
            self.sink.record(
                Level::INFO,
                &format!("removed {qty} of {item} (now {remaining})"),
            );
        }
        Ok(remaining)
    }

    /// Current quantity of `item`; absent items have quantity 0.
    pub fn get_quantity(&self, item: &str) -> u64 {
        self.items.get(item).map_or(0, |q| q.get())
    }

    /// Names of items whose quantity is strictly below `threshold`.
    pub fn low_stock(&self, threshold: u64) -> Vec<&ItemName> {
        self.items
            .iter()
            .filter(|(_, qty)| qty.get() < threshold)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn report(&self) -> StockReport<'_> {
        StockReport::new(&self.items)
    }

    /// Replace the whole mapping with the contents of `source`.
    ///
    /// All-or-nothing: on error the previous mapping and state are kept.
    /// Returns the number of items loaded.
    pub fn load<S>(&mut self, source: &S) -> InventoryResult<usize>
    where
        S: DocumentStore + ?Sized,
    {
        let location = source.location();
        let bytes = source
            .read_document()
            .map_err(|e| InventoryError::not_found(e.to_string()))?;

        let items = codec::decode(&bytes).map_err(|err| match err {
            InventoryError::Format(msg) => InventoryError::format(format!("{location}: {msg}")),
            other => other,
        })?;

        let count = items.len();
        self.items = items;
        self.state = StoreState::Loaded;

        tracing::debug!(%location, items = count, "inventory loaded");
        Ok(count)
    }

    /// Write the whole mapping to `destination`.
    ///
    /// The document is fully encoded before the destination is touched.
    /// Returns the number of items saved.
    pub fn save<S>(&self, destination: &mut S) -> InventoryResult<usize>
    where
        S: DocumentStore + ?Sized,
    {
        let document = codec::encode(&self.items)?;
        destination
            .write_document(&document)
            .map_err(|e| InventoryError::persistence(e.to_string()))?;

        tracing::debug!(
            location = %destination.location(),
            items = self.items.len(),
            bytes = document.len(),
            "inventory saved"
        );
        Ok(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryDocument;
    use crate::sink::{MemorySink, NullSink};
    use proptest::prelude::*;
    use stockkeep_core::ErrorKind;

    fn recording_store() -> InventoryStore<MemorySink> {
        InventoryStore::with_sink(MemorySink::new())
    }

    #[test]
    fn add_to_empty_store() {
        let mut store = recording_store();
        assert_eq!(store.add_item("apple", 5).unwrap(), 5);
        assert_eq!(store.get_quantity("apple"), 5);
    }

    #[test]
    fn add_accumulates() {
        let mut store = recording_store();
        store.add_item("apple", 5).unwrap();
        assert_eq!(store.add_item("apple", 3).unwrap(), 8);
        assert_eq!(store.get_quantity("apple"), 8);
    }

    #[test]
    fn negative_add_is_rejected() {
        let mut store = recording_store();
        let err = store.add_item("apple", -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.get_quantity("apple"), 0);
        assert!(store.sink().records().is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut store = recording_store();
        store.add_item("apple", 1).unwrap();
        let before = store.items().clone();

        assert_eq!(store.add_item("", 4).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(store.add_item("   ", 4).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(store.items(), &before);
    }

    #[test]
    fn overflow_is_rejected_without_mutation() {
        let mut store = recording_store();
        store.add_item("bolts", i64::MAX).unwrap();
        store.add_item("bolts", i64::MAX).unwrap();
        let before = store.items().clone();

        let err = store.add_item("bolts", 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.items(), &before);
    }

    #[test]
    fn add_zero_creates_entry() {
        let mut store = recording_store();
        assert_eq!(store.add_item("pear", 0).unwrap(), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_quantity("pear"), 0);
    }

    #[test]
    fn add_emits_one_info_record() {
        let mut store = recording_store();
        store.add_item("apple", 5).unwrap();
        store.add_item("apple", 3).unwrap();

        let records = store.sink().records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.level == Level::INFO));
        assert_eq!(records[1].message, "added 3 of apple (now 8)");
    }

    #[test]
    fn each_store_has_its_own_log() {
        let mut first = recording_store();
        first.add_item("apple", 1).unwrap();
        let second = recording_store();
        assert!(second.sink().records().is_empty());

        let mut log = first.into_sink();
        let drained = log.take();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].message, "added 1 of apple (now 1)");
    }

    #[test]
    fn absent_item_has_zero_quantity() {
        let store = InventoryStore::with_sink(NullSink);
        assert_eq!(store.get_quantity("orange"), 0);
        assert_eq!(store.get_quantity(""), 0);
    }

    #[test]
    fn remove_decrements() {
        let mut store = recording_store();
        store.add_item("apple", 10).unwrap();
        assert_eq!(store.remove_item("apple", 3).unwrap(), 7);
        assert_eq!(store.get_quantity("apple"), 7);
    }

    #[test]
    fn remove_everything_drops_entry() {
        let mut store = recording_store();
        store.add_item("banana", 20).unwrap();
        assert_eq!(store.remove_item("banana", 25).unwrap(), 0);
        assert!(store.is_empty());
        assert_eq!(
            store.sink().messages().last(),
            Some("removed all stock of banana")
        );
    }

    #[test]
    fn remove_exact_amount_drops_entry() {
        let mut store = recording_store();
        store.add_item("banana", 4).unwrap();
        store.remove_item("banana", 4).unwrap();
        assert!(!store.items().contains_key("banana"));
    }

    #[test]
    fn remove_unstocked_item_is_an_error() {
        let mut store = recording_store();
        let err = store.remove_item("orange", 1).unwrap_err();
        assert_eq!(err, InventoryError::not_stocked("orange"));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_negative_is_rejected() {
        let mut store = recording_store();
        store.add_item("apple", 2).unwrap();
        assert_eq!(store.remove_item("apple", -2).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(store.get_quantity("apple"), 2);
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        let mut store = recording_store();
        store.add_item("apple", 7).unwrap();
        store.add_item("banana", 15).unwrap();
        store.add_item("cherry", 14).unwrap();

        let low: Vec<_> = store.low_stock(15).into_iter().map(ItemName::as_str).collect();
        assert_eq!(low, vec!["apple", "cherry"]);
        assert!(store.low_stock(0).is_empty());
    }

    #[test]
    fn load_missing_source_keeps_state() {
        let mut store = recording_store();
        store.add_item("apple", 1).unwrap();

        let err = store.load(&MemoryDocument::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.get_quantity("apple"), 1);
        assert_eq!(store.state(), StoreState::Empty);
    }

    #[test]
    fn load_malformed_source_keeps_state() {
        let mut store = recording_store();
        store.add_item("apple", 1).unwrap();

        let source = MemoryDocument::with_contents(r#"{"pear": 3, "plum": -2}"#);
        let err = store.load(&source).unwrap_err();
        match err {
            InventoryError::Format(msg) => {
                assert!(msg.starts_with("<memory>: "));
                assert!(msg.contains("negative"));
            }
            other => panic!("expected format error, got {other:?}"),
        }
        assert_eq!(store.get_quantity("apple"), 1);
        assert_eq!(store.get_quantity("pear"), 0);
    }

    #[test]
    fn load_replaces_everything() {
        let mut store = recording_store();
        store.add_item("apple", 1).unwrap();

        let source = MemoryDocument::with_contents(r#"{"pear": 3}"#);
        assert_eq!(store.load(&source).unwrap(), 1);
        assert_eq!(store.state(), StoreState::Loaded);
        assert_eq!(store.get_quantity("apple"), 0);
        assert_eq!(store.get_quantity("pear"), 3);

        let entries: Vec<_> = store.iter().map(|(name, qty)| (name.as_str(), qty.get())).collect();
        assert_eq!(entries, vec![("pear", 3)]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = recording_store();
        store.add_item("apple", 5).unwrap();
        store.add_item("banana", 2).unwrap();

        let mut doc = MemoryDocument::new();
        assert_eq!(store.save(&mut doc).unwrap(), 2);

        let mut reloaded = InventoryStore::with_sink(NullSink);
        reloaded.load(&doc).unwrap();
        assert_eq!(reloaded.items(), store.items());
        assert_eq!(reloaded.get_quantity("apple"), 5);
        assert_eq!(reloaded.get_quantity("banana"), 2);
    }

    #[test]
    fn failed_save_surfaces_persistence_error() {
        let mut store = recording_store();
        store.add_item("apple", 5).unwrap();

        let mut doc = MemoryDocument::with_contents("{}\n").reject_writes();
        let err = store.save(&mut doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(doc.contents(), Some(&b"{}\n"[..]));
    }

    #[test]
    fn report_lists_items() {
        let mut store = recording_store();
        store.add_item("apple", 5).unwrap();
        let report = store.report().to_string();
        assert!(report.contains("apple -> 5"));
    }

    fn item_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9 _-]{0,12}"
    }

    /// Names with quotes, backslashes, control and non-ASCII characters.
    fn any_item_name() -> impl Strategy<Value = String> {
        prop_oneof![
            item_name(),
            "\\PC{1,8}",
            r#"[\x00-\x1f"\\a-z\u{e9}\u{4e2d}]{1,8}"#,
        ]
        .prop_filter("valid item name", |name| ItemName::new(name.as_str()).is_ok())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: add then get returns the previous quantity plus the delta.
        #[test]
        fn add_then_get_sums(
            seed in prop::collection::vec((any_item_name(), 0i64..1_000_000), 0..10),
            item in any_item_name(),
            qty in 0i64..1_000_000,
        ) {
            let mut store = InventoryStore::with_sink(NullSink);
            for (name, q) in &seed {
                store.add_item(name, *q).unwrap();
            }
            let before = store.get_quantity(&item);

            let returned = store.add_item(&item, qty).unwrap();
            prop_assert_eq!(returned, before + qty as u64);
            prop_assert_eq!(store.get_quantity(&item), before + qty as u64);
        }

        /// Property: a rejected add never changes the mapping.
        #[test]
        fn invalid_add_leaves_store_unchanged(
            seed in prop::collection::vec((item_name(), 0i64..1_000), 0..10),
            item in prop_oneof![item_name(), Just(String::new()), Just("  ".to_string())],
            qty in -1_000_000i64..1_000,
        ) {
            prop_assume!(qty < 0 || item.trim().is_empty());

            let mut store = InventoryStore::with_sink(MemorySink::new());
            for (name, q) in &seed {
                store.add_item(name, *q).unwrap();
            }
            let snapshot = store.items().clone();
            let logged = store.sink().records().len();

            let err = store.add_item(&item, qty).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Validation);
            prop_assert_eq!(store.items(), &snapshot);
            prop_assert_eq!(store.sink().records().len(), logged);
        }

        /// Property: load(save(S)) == S.
        #[test]
        fn save_load_round_trip(
            seed in prop::collection::vec((any_item_name(), 0i64..i64::MAX), 0..20),
        ) {
            let mut store = InventoryStore::with_sink(NullSink);
            for (name, q) in &seed {
                let _ = store.add_item(name, *q);
            }

            let mut doc = MemoryDocument::new();
            store.save(&mut doc).unwrap();

            let mut reloaded = InventoryStore::with_sink(NullSink);
            reloaded.load(&doc).unwrap();
            prop_assert_eq!(reloaded.items(), store.items());
        }

        /// Property: get_quantity is stable without intervening mutation.
        #[test]
        fn get_quantity_is_idempotent(
            seed in prop::collection::vec((item_name(), 0i64..1_000), 0..10),
            item in item_name(),
        ) {
            let mut store = InventoryStore::with_sink(NullSink);
            for (name, q) in &seed {
                store.add_item(name, *q).unwrap();
            }
            let first = store.get_quantity(&item);
            for _ in 0..3 {
                prop_assert_eq!(store.get_quantity(&item), first);
            }
        }
    }
}
