//! Market-data message records
//!
//! Minimal carriers for updating a market-by-price book. Every endpoint
//! has its own wire idiosyncrasies; a decoder normalizes them into these
//! records, and the book writes the actual effect of each entry back into
//! the record for downstream publishers and archivers.

use crate::price::Price;
use crate::quantity::Quantity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a market-data entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdEntryType {
    Bid,
    Offer,
    Trade,
}

/// Effect of an update on a price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdUpdateAction {
    New,
    Change,
    Delete,
    None,
}

/// Message kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    MdSnapshotFullRefresh,
    MdIncrementalRefresh,
}

/// Single per-level update record.
///
/// `action` and `price_level_index` arrive as decoder hints; applying the
/// entry to a book overwrites both with what actually happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdEntry {
    #[serde(rename = "md_update_action")]
    pub action: MdUpdateAction,
    #[serde(rename = "md_entry_type")]
    pub entry_type: MdEntryType,
    pub symbol: String,
    pub rpt_sequence_number: u64,
    pub price: Price,
    pub size: Quantity,
    pub number_of_orders: i32,
    #[serde(rename = "price_level")]
    pub price_level_index: i32,
}

impl fmt::Display for MdEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {} {}@{} orders={} level={}",
            self.action,
            self.entry_type,
            self.symbol,
            self.size,
            self.price,
            self.number_of_orders,
            self.price_level_index
        )
    }
}

/// Full replacement of one symbol's book state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdSnapshotFullRefresh {
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    pub endpoint_send_time: DateTime<Utc>,
    pub transact_time: DateTime<Utc>,
    pub symbol: String,
    pub endpoint_name: String,
    pub msg_sequence_number: u64,
    pub rpt_sequence_number: u64,
    pub entries: Vec<MdEntry>,
}

impl MdSnapshotFullRefresh {
    /// Empty snapshot stamped with `timestamp`, message type pre-set
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            message_type: MessageType::MdSnapshotFullRefresh,
            timestamp,
            endpoint_send_time: timestamp,
            transact_time: timestamp,
            symbol: String::new(),
            endpoint_name: String::new(),
            msg_sequence_number: 0,
            rpt_sequence_number: 0,
            entries: Vec::new(),
        }
    }
}

impl fmt::Display for MdSnapshotFullRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Snapshot[{}]: {} entries, seq={} @ {}",
            self.symbol,
            self.entries.len(),
            self.msg_sequence_number,
            self.timestamp
        )
    }
}

/// Delta update applied to existing book state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdIncrementalRefresh {
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    pub endpoint_send_time: DateTime<Utc>,
    pub transact_time: DateTime<Utc>,
    pub endpoint_name: String,
    pub msg_sequence_number: u64,
    pub entries: Vec<MdEntry>,
}

impl MdIncrementalRefresh {
    /// Empty incremental stamped with `timestamp`, message type pre-set
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            message_type: MessageType::MdIncrementalRefresh,
            timestamp,
            endpoint_send_time: timestamp,
            transact_time: timestamp,
            endpoint_name: String::new(),
            msg_sequence_number: 0,
            entries: Vec::new(),
        }
    }
}

impl fmt::Display for MdIncrementalRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Incremental[{}]: {} entries, seq={} @ {}",
            self.endpoint_name,
            self.entries.len(),
            self.msg_sequence_number,
            self.timestamp
        )
    }
}
