use ethers_core::types::U256;
use serde::Serialize;

/// A block transaction reduced to the fields the aggregation pass needs.
/// Addresses are lower-case "0x…" hex; `from`/`to` stay optional so the
/// sentinel paths (unknown sender, contract creation) are representable.
#[derive(Debug, Clone, Serialize)]
pub struct TxRecord {
    pub hash: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub gas_price_wei: U256,
}

#[derive(Debug, Clone)]
pub struct BlockRecord {
    pub number: u64,
    pub transactions: Vec<TxRecord>,
}
