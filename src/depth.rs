//! Bounded sorted-array price-level engine
//!
//! One side of a book keeps its levels in a pre-allocated fixed-capacity
//! array ordered by the side's comparator. Tracked depth is shallow (a few
//! dozen levels at most), so shifting a contiguous block in place beats a
//! pointer-linked structure on cache locality, and the fixed capacity
//! bounds both the memory footprint and the worst case per-update latency.

use crate::error::DepthError;
use crate::messages::MdUpdateAction;
use crate::price::Price;
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sentinel marking a vacant level slot
pub const INT32_NULL: i32 = i32::MAX;

/// Ranking strategy for one side of a book.
///
/// The comparator orders prices so that the level closer to the inside
/// market compares `Less`: ascending for offers (lowest price ranks
/// first), descending for bids (highest price ranks first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn compare(self, a: Price, b: Price) -> Ordering {
        match self {
            SortOrder::Ascending => a.mantissa.cmp(&b.mantissa),
            SortOrder::Descending => b.mantissa.cmp(&a.mantissa),
        }
    }
}

/// Entry of a price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevelEntry {
    pub price: Price,
    pub quantity: Quantity,
    pub number_of_orders: i32,
}

impl PriceLevelEntry {
    pub fn new(price: Price, quantity: Quantity, number_of_orders: i32) -> Self {
        Self {
            price,
            quantity,
            number_of_orders,
        }
    }

    /// Unoccupied slot, recognizable by its null order count
    pub fn vacant() -> Self {
        Self {
            price: Price::default(),
            quantity: Quantity::default(),
            number_of_orders: INT32_NULL,
        }
    }
}

impl Default for PriceLevelEntry {
    fn default() -> Self {
        Self::vacant()
    }
}

/// Effect of a level operation: what happened, and the 1-based rank of the
/// affected level in the resulting ordering (0 when nothing happened).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    pub action: MdUpdateAction,
    pub level_index: i32,
}

impl LevelResult {
    /// No level was touched
    pub const NONE: LevelResult = LevelResult {
        action: MdUpdateAction::None,
        level_index: 0,
    };
}

/// Fixed-capacity container of price level entries, ordered by a
/// comparator.
///
/// Slots `[0, size)` hold the tracked levels in strict comparator order;
/// slots `[size, capacity)` hold stale data and are never exposed. The
/// capacity is fixed at construction and storage is never reallocated.
#[derive(Debug, Clone)]
pub struct LevelEntryArray {
    levels: Vec<PriceLevelEntry>,
    size: usize,
    order: SortOrder,
}

impl LevelEntryArray {
    /// Allocates `capacity` vacant slots up front.
    pub fn new(capacity: usize, order: SortOrder) -> Self {
        Self {
            levels: vec![PriceLevelEntry::vacant(); capacity],
            size: 0,
            order,
        }
    }

    /// Number of occupied levels
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Entry at `index`. Valid only for `index` in `[0, size)`.
    pub fn get(&self, index: usize) -> PriceLevelEntry {
        self.levels[index]
    }

    /// Occupied prefix, best level first
    pub fn as_slice(&self) -> &[PriceLevelEntry] {
        &self.levels[..self.size]
    }

    /// Appends a level at the tail without checking order against the
    /// existing entries. Intended solely for bulk-loading a pre-sorted
    /// snapshot; fails with `CapacityExceeded` (and no mutation) when the
    /// array is full.
    pub fn push_back(
        &mut self,
        price: Price,
        quantity: Quantity,
        number_of_orders: i32,
    ) -> Result<LevelResult, DepthError> {
        if self.size >= self.levels.len() {
            return Err(DepthError::CapacityExceeded);
        }

        self.levels[self.size] = PriceLevelEntry::new(price, quantity, number_of_orders);
        self.size += 1;

        Ok(LevelResult {
            action: MdUpdateAction::New,
            level_index: self.size as i32,
        })
    }

    /// Deletes the level at `price`, shifting every worse level up one
    /// rank.
    ///
    /// The scan stops as soon as the probe ranks strictly before the
    /// current entry: the array is ordered, so no match can exist beyond
    /// that point. A price that is not tracked is not an error; the result
    /// carries `None` with a zero index. The trailing stale slot is left
    /// untouched.
    pub fn delete(&mut self, price: Price) -> LevelResult {
        for i in 0..self.size {
            match self.order.compare(price, self.levels[i].price) {
                Ordering::Equal => {
                    self.levels.copy_within(i + 1..self.size, i);
                    self.size -= 1;
                    return LevelResult {
                        action: MdUpdateAction::Delete,
                        level_index: (i + 1) as i32,
                    };
                }
                Ordering::Less => break,
                Ordering::Greater => {}
            }
        }
        LevelResult::NONE
    }

    /// Updates the quantity and order count at `price`, or inserts a new
    /// level at its ranked position.
    ///
    /// Inserting into a full array evicts the current worst level at the
    /// tail. A price ranking after every tracked level of a full array is
    /// discarded with a `None` result: it falls outside the tracked depth
    /// window.
    pub fn insert_or_update(
        &mut self,
        price: Price,
        quantity: Quantity,
        number_of_orders: i32,
    ) -> LevelResult {
        let capacity = self.levels.len();
        for i in 0..self.size {
            match self.order.compare(price, self.levels[i].price) {
                Ordering::Less => {
                    // Shift [i, end) right one slot; when full, end stops
                    // short of the tail so the worst level drops off.
                    let end = if self.size < capacity {
                        self.size
                    } else {
                        capacity - 1
                    };
                    self.levels.copy_within(i..end, i + 1);
                    self.levels[i] = PriceLevelEntry::new(price, quantity, number_of_orders);
                    if self.size < capacity {
                        self.size += 1;
                    }
                    return LevelResult {
                        action: MdUpdateAction::New,
                        level_index: (i + 1) as i32,
                    };
                }
                Ordering::Equal => {
                    let entry = &mut self.levels[i];
                    entry.quantity = quantity;
                    entry.number_of_orders = number_of_orders;
                    return LevelResult {
                        action: MdUpdateAction::Change,
                        level_index: (i + 1) as i32,
                    };
                }
                Ordering::Greater => {}
            }
        }

        // Worse than every tracked level: append if there is room,
        // otherwise the level is outside the depth window.
        if self.size < capacity {
            self.levels[self.size] = PriceLevelEntry::new(price, quantity, number_of_orders);
            self.size += 1;
            return LevelResult {
                action: MdUpdateAction::New,
                level_index: self.size as i32,
            };
        }
        LevelResult::NONE
    }

    /// Resets the occupied count to zero. Storage is kept for the next
    /// snapshot; nothing is cleared or freed.
    pub fn clear(&mut self) {
        self.size = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::parse_price;
    use crate::quantity::parse_quantity;

    fn px(s: &str) -> Price {
        parse_price(s).unwrap()
    }

    fn qty(s: &str) -> Quantity {
        parse_quantity(s).unwrap()
    }

    fn filled(order: SortOrder, capacity: usize, prices: &[&str]) -> LevelEntryArray {
        let mut array = LevelEntryArray::new(capacity, order);
        for p in prices {
            array.push_back(px(p), qty("1"), 1).unwrap();
        }
        array
    }

    fn prices(array: &LevelEntryArray) -> Vec<Price> {
        array.as_slice().iter().map(|e| e.price).collect()
    }

    fn want_prices(texts: &[&str]) -> Vec<Price> {
        texts.iter().map(|t| px(t)).collect()
    }

    #[test]
    fn compare_ascending() {
        assert_eq!(
            SortOrder::Ascending.compare(px("9"), px("10")),
            Ordering::Less
        );
        assert_eq!(
            SortOrder::Ascending.compare(px("10"), px("10")),
            Ordering::Equal
        );
        assert_eq!(
            SortOrder::Ascending.compare(px("11"), px("10")),
            Ordering::Greater
        );
    }

    #[test]
    fn compare_descending() {
        assert_eq!(
            SortOrder::Descending.compare(px("9"), px("10")),
            Ordering::Greater
        );
        assert_eq!(
            SortOrder::Descending.compare(px("10"), px("10")),
            Ordering::Equal
        );
        assert_eq!(
            SortOrder::Descending.compare(px("11"), px("10")),
            Ordering::Less
        );
    }

    #[test]
    fn new_array_is_empty_with_vacant_slots() {
        let array = LevelEntryArray::new(2, SortOrder::Ascending);
        assert_eq!(array.size(), 0);
        assert_eq!(array.capacity(), 2);
        assert!(array.is_empty());
        assert_eq!(array.as_slice(), &[]);
    }

    #[test]
    fn push_back_to_empty() {
        let mut array = LevelEntryArray::new(5, SortOrder::Ascending);
        let result = array.push_back(px("10"), qty("1"), 1).unwrap();
        assert_eq!(
            result,
            LevelResult {
                action: MdUpdateAction::New,
                level_index: 1
            }
        );
        assert_eq!(array.size(), 1);
    }

    #[test]
    fn push_back_appends_after_existing_entry() {
        let mut array = filled(SortOrder::Ascending, 5, &["9"]);
        let result = array.push_back(px("10"), qty("1"), 1).unwrap();
        assert_eq!(
            result,
            LevelResult {
                action: MdUpdateAction::New,
                level_index: 2
            }
        );
        assert_eq!(prices(&array), want_prices(&["9", "10"]));
    }

    #[test]
    fn push_back_to_full_fails_without_mutation() {
        let mut array = filled(SortOrder::Ascending, 5, &["9", "10", "11", "12", "13"]);
        let err = array.push_back(px("15"), qty("1"), 1).unwrap_err();
        assert_eq!(err, DepthError::CapacityExceeded);
        assert_eq!(array.size(), 5);
        assert_eq!(prices(&array), want_prices(&["9", "10", "11", "12", "13"]));
    }

    #[test]
    fn delete_offers() {
        let start = ["9", "10", "11", "14", "15"];
        let cases: [(&str, LevelResult, &[&str]); 4] = [
            (
                "9",
                LevelResult {
                    action: MdUpdateAction::Delete,
                    level_index: 1,
                },
                &["10", "11", "14", "15"],
            ),
            (
                "11",
                LevelResult {
                    action: MdUpdateAction::Delete,
                    level_index: 3,
                },
                &["9", "10", "14", "15"],
            ),
            (
                "15",
                LevelResult {
                    action: MdUpdateAction::Delete,
                    level_index: 5,
                },
                &["9", "10", "11", "14"],
            ),
            ("13", LevelResult::NONE, &["9", "10", "11", "14", "15"]),
        ];
        for (probe, want, want_levels) in cases {
            let mut array = filled(SortOrder::Ascending, 5, &start);
            assert_eq!(array.delete(px(probe)), want, "deleting {probe}");
            assert_eq!(prices(&array), want_prices(want_levels), "deleting {probe}");
            assert_eq!(array.size(), want_levels.len());
        }
    }

    #[test]
    fn delete_bids() {
        let start = ["9", "8", "6", "5", "2"];
        let cases: [(&str, LevelResult, &[&str]); 4] = [
            (
                "9",
                LevelResult {
                    action: MdUpdateAction::Delete,
                    level_index: 1,
                },
                &["8", "6", "5", "2"],
            ),
            (
                "5",
                LevelResult {
                    action: MdUpdateAction::Delete,
                    level_index: 4,
                },
                &["9", "8", "6", "2"],
            ),
            (
                "2",
                LevelResult {
                    action: MdUpdateAction::Delete,
                    level_index: 5,
                },
                &["9", "8", "6", "5"],
            ),
            ("3", LevelResult::NONE, &["9", "8", "6", "5", "2"]),
        ];
        for (probe, want, want_levels) in cases {
            let mut array = filled(SortOrder::Descending, 5, &start);
            assert_eq!(array.delete(px(probe)), want, "deleting {probe}");
            assert_eq!(prices(&array), want_prices(want_levels), "deleting {probe}");
            assert_eq!(array.size(), want_levels.len());
        }
    }

    #[test]
    fn insert_or_update_offers() {
        let cases: [(&str, &str, i32, LevelResult, &[&str]); 4] = [
            (
                "9",
                "3",
                1,
                LevelResult {
                    action: MdUpdateAction::New,
                    level_index: 1,
                },
                &["9", "10", "12"],
            ),
            (
                "11",
                "3",
                1,
                LevelResult {
                    action: MdUpdateAction::New,
                    level_index: 2,
                },
                &["10", "11", "12"],
            ),
            (
                "15",
                "3",
                1,
                LevelResult {
                    action: MdUpdateAction::New,
                    level_index: 3,
                },
                &["10", "12", "15"],
            ),
            (
                "12",
                "5",
                3,
                LevelResult {
                    action: MdUpdateAction::Change,
                    level_index: 2,
                },
                &["10", "12"],
            ),
        ];
        for (probe, quantity, orders, want, want_levels) in cases {
            let mut array = filled(SortOrder::Ascending, 5, &["10", "12"]);
            assert_eq!(
                array.insert_or_update(px(probe), qty(quantity), orders),
                want,
                "inserting {probe}"
            );
            assert_eq!(prices(&array), want_prices(want_levels), "inserting {probe}");
            assert_eq!(array.size(), want_levels.len());
        }
    }

    #[test]
    fn insert_or_update_bids() {
        let cases: [(&str, LevelResult, &[&str]); 4] = [
            (
                "12",
                LevelResult {
                    action: MdUpdateAction::New,
                    level_index: 1,
                },
                &["12", "10", "7"],
            ),
            (
                "8",
                LevelResult {
                    action: MdUpdateAction::New,
                    level_index: 2,
                },
                &["10", "8", "7"],
            ),
            (
                "6",
                LevelResult {
                    action: MdUpdateAction::New,
                    level_index: 3,
                },
                &["10", "7", "6"],
            ),
            (
                "7",
                LevelResult {
                    action: MdUpdateAction::Change,
                    level_index: 2,
                },
                &["10", "7"],
            ),
        ];
        for (probe, want, want_levels) in cases {
            let mut array = filled(SortOrder::Descending, 5, &["10", "7"]);
            assert_eq!(
                array.insert_or_update(px(probe), qty("3"), 1),
                want,
                "inserting {probe}"
            );
            assert_eq!(prices(&array), want_prices(want_levels), "inserting {probe}");
        }
    }

    #[test]
    fn update_keeps_price_and_replaces_quantity_and_orders() {
        let mut array = filled(SortOrder::Ascending, 5, &["10", "12"]);
        array.insert_or_update(px("12"), qty("5"), 3);
        let entry = array.get(1);
        assert_eq!(entry.price, px("12"));
        assert_eq!(entry.quantity, qty("5"));
        assert_eq!(entry.number_of_orders, 3);
    }

    #[test]
    fn insert_into_full_array_evicts_worst_level() {
        let mut array = filled(SortOrder::Ascending, 5, &["10", "11", "12", "13", "14"]);
        let result = array.insert_or_update(px("9"), qty("2"), 2);
        assert_eq!(
            result,
            LevelResult {
                action: MdUpdateAction::New,
                level_index: 1
            }
        );
        assert_eq!(prices(&array), want_prices(&["9", "10", "11", "12", "13"]));
        assert_eq!(array.size(), 5);
    }

    #[test]
    fn insert_just_above_full_tail_evicts_the_tail() {
        let mut array = filled(SortOrder::Ascending, 5, &["10", "11", "12", "13", "15"]);
        let result = array.insert_or_update(px("14"), qty("2"), 2);
        assert_eq!(
            result,
            LevelResult {
                action: MdUpdateAction::New,
                level_index: 5
            }
        );
        assert_eq!(prices(&array), want_prices(&["10", "11", "12", "13", "14"]));
    }

    #[test]
    fn insert_worse_than_full_array_is_discarded() {
        let mut array = filled(SortOrder::Ascending, 5, &["10", "11", "12", "13", "14"]);
        let result = array.insert_or_update(px("15"), qty("2"), 2);
        assert_eq!(result, LevelResult::NONE);
        assert_eq!(prices(&array), want_prices(&["10", "11", "12", "13", "14"]));
        assert_eq!(array.size(), 5);
    }

    #[test]
    fn clear_resets_size_and_keeps_capacity() {
        let mut array = filled(SortOrder::Descending, 5, &["10", "7"]);
        array.clear();
        assert_eq!(array.size(), 0);
        assert_eq!(array.capacity(), 5);
        assert!(array.push_back(px("8"), qty("1"), 1).is_ok());
    }
}
