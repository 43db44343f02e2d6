//! Market-by-price book built on two ranked level arrays

use crate::depth::{LevelEntryArray, SortOrder};
use crate::error::DepthError;
use crate::messages::{
    MdEntry, MdEntryType, MdIncrementalRefresh, MdSnapshotFullRefresh, MdUpdateAction,
};

/// Two-sided market-by-price book with a fixed tracked depth.
///
/// Bids rank descending (highest price first), offers ascending (lowest
/// price first). Storage for both sides is allocated once at construction
/// and reused across snapshots. One instance is owned by exactly one
/// processing context; there is no internal locking.
#[derive(Debug)]
pub struct MarketByPriceBook {
    pub bids: LevelEntryArray,
    pub offers: LevelEntryArray,
}

impl MarketByPriceBook {
    /// Allocates a book tracking `depth` levels per side.
    pub fn new(depth: usize) -> Self {
        Self {
            bids: LevelEntryArray::new(depth, SortOrder::Descending),
            offers: LevelEntryArray::new(depth, SortOrder::Ascending),
        }
    }

    /// Clears both sides.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.offers.clear();
    }

    /// Replaces the book state from a full refresh.
    ///
    /// Entries are trusted to arrive pre-sorted per side and are loaded in
    /// arrival order with `push_back`; each entry's action and level index
    /// are overwritten with the actual effect. Overflowing a side during
    /// load means the feed and this book disagree on depth, so the error
    /// is surfaced rather than skipped.
    pub fn on_snapshot(&mut self, snapshot: &mut MdSnapshotFullRefresh) -> Result<(), DepthError> {
        tracing::trace!(
            symbol = %snapshot.symbol,
            entries = snapshot.entries.len(),
            "applying snapshot"
        );
        self.clear();
        for entry in &mut snapshot.entries {
            let result = match entry.entry_type {
                MdEntryType::Bid => {
                    self.bids
                        .push_back(entry.price, entry.size, entry.number_of_orders)?
                }
                MdEntryType::Offer => {
                    self.offers
                        .push_back(entry.price, entry.size, entry.number_of_orders)?
                }
                MdEntryType::Trade => continue,
            };
            entry.action = result.action;
            entry.price_level_index = result.level_index;
        }
        Ok(())
    }

    /// Applies an incremental refresh, entry by entry in arrival order.
    /// Each entry is fully applied, including its write-back, before the
    /// next is considered.
    pub fn on_incremental_update(&mut self, incremental: &mut MdIncrementalRefresh) {
        for entry in &mut incremental.entries {
            self.update(entry);
        }
    }

    /// Applies a single entry and writes the actual effect back into it.
    ///
    /// A `Delete` keeps its action even when no level matched and only the
    /// level index is written back; any other action hint is replaced by
    /// the insert-or-update outcome. Trades do not touch the book.
    pub fn update(&mut self, entry: &mut MdEntry) {
        let side = match entry.entry_type {
            MdEntryType::Bid => &mut self.bids,
            MdEntryType::Offer => &mut self.offers,
            MdEntryType::Trade => return,
        };
        if entry.action == MdUpdateAction::Delete {
            let result = side.delete(entry.price);
            entry.price_level_index = result.level_index;
        } else {
            let result = side.insert_or_update(entry.price, entry.size, entry.number_of_orders);
            entry.action = result.action;
            entry.price_level_index = result.level_index;
        }
    }
}
