//! # mbp-book
//!
//! Market-by-price order book depth maintained from a stream of
//! market-data update records, with exact fixed-point decimal arithmetic
//! for prices and quantities.
//!
//! Each side of a book is a capacity-bounded, comparator-ordered array of
//! price levels mutated in place: no allocation happens on the update
//! path, and the tracked depth bounds the worst case work per message.
//! Update records are mutated in place with the actual effect of applying
//! them (action taken and resulting 1-based rank), ready for downstream
//! publishers and archivers.
//!
//! ## Quick Start
//! ```rust
//! use mbp_book::prelude::*;
//!
//! let mut book = MarketByPriceBook::new(5);
//! let mut entry = MdEntry {
//!     action: MdUpdateAction::New,
//!     entry_type: MdEntryType::Offer,
//!     symbol: "BTCUSD".to_string(),
//!     rpt_sequence_number: 1,
//!     price: parse_price("27100.5").unwrap(),
//!     size: parse_quantity("0.25").unwrap(),
//!     number_of_orders: 3,
//!     price_level_index: 0,
//! };
//! book.update(&mut entry);
//! assert_eq!(entry.price_level_index, 1);
//! ```

pub mod archiver;
pub mod book;
pub mod decimal;
pub mod depth;
pub mod error;
pub mod messages;
pub mod price;
pub mod quantity;

pub use archiver::MarketDataArchiver;
pub use book::MarketByPriceBook;
pub use decimal::{dtoa, Decimal, Decimal8, Decimal9};
pub use depth::{LevelEntryArray, LevelResult, PriceLevelEntry, SortOrder, INT32_NULL};
pub use error::{DecimalError, DepthError};
pub use messages::{
    MdEntry, MdEntryType, MdIncrementalRefresh, MdSnapshotFullRefresh, MdUpdateAction, MessageType,
};
pub use price::{parse_price, Price, PRICE_EXPONENT};
pub use quantity::{parse_quantity, Quantity, QUANTITY_EXPONENT};

/// Prelude - minimal public API surface
///
/// Import with: `use mbp_book::prelude::*;`
///
/// This provides the types most consumers touch:
/// - `MarketByPriceBook` - two-sided depth book
/// - `MdEntry` and the message containers
/// - `Price` / `Quantity` and their parsers
pub mod prelude {
    pub use crate::book::MarketByPriceBook;
    pub use crate::depth::{LevelEntryArray, LevelResult, PriceLevelEntry, SortOrder};
    pub use crate::error::{DecimalError, DepthError};
    pub use crate::messages::{
        MdEntry, MdEntryType, MdIncrementalRefresh, MdSnapshotFullRefresh, MdUpdateAction,
        MessageType,
    };
    pub use crate::price::{parse_price, Price};
    pub use crate::quantity::{parse_quantity, Quantity};
}

/// Initialize logging for library consumers
pub fn init_logging() {
    tracing_subscriber::fmt::init();
}
