use chrono::Utc;
use mbp_book::prelude::*;
use mbp_book::init_logging;

fn entry(
    entry_type: MdEntryType,
    px: &str,
    qty: &str,
    orders: i32,
) -> Result<MdEntry, DecimalError> {
    Ok(MdEntry {
        action: MdUpdateAction::New,
        entry_type,
        symbol: "BTCUSD".to_string(),
        rpt_sequence_number: 0,
        price: parse_price(px)?,
        size: parse_quantity(qty)?,
        number_of_orders: orders,
        price_level_index: 0,
    })
}

fn print_book(book: &MarketByPriceBook) {
    println!("  {:<6} {:>16} {:>16}", "side", "price", "quantity");
    for level in book.bids.as_slice() {
        println!("  {:<6} {:>16} {:>16}", "bid", level.price, level.quantity);
    }
    for level in book.offers.as_slice() {
        println!("  {:<6} {:>16} {:>16}", "offer", level.price, level.quantity);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut book = MarketByPriceBook::new(5);

    let mut snapshot = MdSnapshotFullRefresh::new(Utc::now());
    snapshot.symbol = "BTCUSD".to_string();
    snapshot.entries = vec![
        entry(MdEntryType::Bid, "27099.5", "1.25", 3)?,
        entry(MdEntryType::Bid, "27099.0", "0.75", 1)?,
        entry(MdEntryType::Offer, "27100.5", "0.25", 2)?,
        entry(MdEntryType::Offer, "27101.0", "2.00", 4)?,
    ];
    book.on_snapshot(&mut snapshot)?;

    println!("after snapshot:");
    print_book(&book);

    let mut incremental = MdIncrementalRefresh::new(Utc::now());
    incremental.entries = vec![
        entry(MdEntryType::Bid, "27100.0", "0.50", 1)?,
        {
            let mut delete = entry(MdEntryType::Offer, "27100.5", "0", 0)?;
            delete.action = MdUpdateAction::Delete;
            delete
        },
    ];
    book.on_incremental_update(&mut incremental);

    println!("after incremental update:");
    print_book(&book);

    for e in &incremental.entries {
        println!("applied: {e}");
    }

    println!("{}", serde_json::to_string_pretty(&incremental)?);

    Ok(())
}
