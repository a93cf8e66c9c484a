use std::collections::BTreeMap;

use ethers_providers::Middleware;
use serde::Serialize;

use crate::errors::ProbeError;
use crate::eth::EthClient;
use crate::models::TxRecord;

/// Tally key for transactions whose sender is not known.
pub const UNKNOWN_SENDER: &str = "unknown";
/// Tally key for transactions with no receiver (contract deployments).
pub const CONTRACT_CREATION: &str = "contract_creation";

#[derive(Debug, Clone, Serialize)]
pub struct AddressCount {
    pub address: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationResult {
    pub top_sender: Option<AddressCount>,
    pub top_receiver: Option<AddressCount>,
    pub max_gas_price_tx: Option<TxRecord>,
}

/// Fetches one block with full transaction bodies and aggregates it. A
/// missing block or an empty transaction list is a valid empty outcome,
/// not an error; only the RPC fetch itself can fail.
pub async fn aggregate<M: Middleware>(
    client: &EthClient<M>,
    block_number: u64,
) -> Result<AggregationResult, ProbeError> {
    let block = client.block_with_txs(block_number).await?;
    let transactions = block.map(|b| b.transactions).unwrap_or_default();
    Ok(aggregate_transactions(&transactions))
}

/// Single pass over the transaction sequence: sender and receiver tallies
/// plus the running max-gas-price candidate. O(n) time, O(u) space for u
/// distinct addresses.
pub fn aggregate_transactions(transactions: &[TxRecord]) -> AggregationResult {
    let (sender_counts, receiver_counts) = tally_addresses(transactions);

    let mut max_gas_price_tx: Option<&TxRecord> = None;
    for tx in transactions {
        // Strict `>` keeps the earliest-seen transaction on equal gas prices.
        match max_gas_price_tx {
            None => max_gas_price_tx = Some(tx),
            Some(current) if tx.gas_price_wei > current.gas_price_wei => {
                max_gas_price_tx = Some(tx)
            }
            Some(_) => {}
        }
    }

    AggregationResult {
        top_sender: top_entry(&sender_counts),
        top_receiver: top_entry(&receiver_counts),
        max_gas_price_tx: max_gas_price_tx.cloned(),
    }
}

type AddressTally = BTreeMap<String, u64>;

fn tally_addresses(transactions: &[TxRecord]) -> (AddressTally, AddressTally) {
    let mut sender_counts = AddressTally::new();
    let mut receiver_counts = AddressTally::new();

    for tx in transactions {
        let sender = tx
            .from
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| UNKNOWN_SENDER.to_string());
        *sender_counts.entry(sender).or_insert(0) += 1;

        let receiver = tx
            .to
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| CONTRACT_CREATION.to_string());
        *receiver_counts.entry(receiver).or_insert(0) += 1;
    }

    (sender_counts, receiver_counts)
}

/// Scans in the map's iteration order (BTreeMap: sorted by key, so the scan
/// is deterministic) and keeps the first entry among equal counts.
fn top_entry(counts: &BTreeMap<String, u64>) -> Option<AddressCount> {
    let mut best: Option<(&str, u64)> = None;
    for (address, &count) in counts {
        match best {
            None => best = Some((address, count)),
            Some((_, best_count)) if count > best_count => best = Some((address, count)),
            Some(_) => {}
        }
    }
    best.map(|(address, count)| AddressCount {
        address: address.to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::U256;

    fn tx(hash: &str, from: Option<&str>, to: Option<&str>, gas_price: u64) -> TxRecord {
        TxRecord {
            hash: hash.to_string(),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            gas_price_wei: U256::from(gas_price),
        }
    }

    #[test]
    fn empty_block_yields_all_none() {
        let result = aggregate_transactions(&[]);
        assert!(result.top_sender.is_none());
        assert!(result.top_receiver.is_none());
        assert!(result.max_gas_price_tx.is_none());
    }

    #[test]
    fn tally_counts_sum_to_transaction_count() {
        let txs = vec![
            tx("0x1", Some("0xaaa"), Some("0xddd"), 1),
            tx("0x2", Some("0xbbb"), None, 2),
            tx("0x3", None, Some("0xddd"), 3),
            tx("0x4", Some("0xaaa"), Some("0xeee"), 4),
        ];
        let (senders, receivers) = tally_addresses(&txs);
        assert_eq!(senders.values().sum::<u64>(), txs.len() as u64);
        assert_eq!(receivers.values().sum::<u64>(), txs.len() as u64);
    }

    #[test]
    fn senders_differing_only_in_case_share_one_tally() {
        let txs = vec![
            tx("0x1", Some("0xAbCd"), Some("0x1"), 1),
            tx("0x2", Some("0xabcd"), Some("0x2"), 1),
            tx("0x3", Some("0xABCD"), Some("0x3"), 1),
        ];
        let result = aggregate_transactions(&txs);
        let top = result.top_sender.unwrap();
        assert_eq!(top.address, "0xabcd");
        assert_eq!(top.count, 3);
    }

    #[test]
    fn missing_receiver_counts_as_contract_creation() {
        let txs = vec![
            tx("0x1", Some("0xaaa"), None, 1),
            tx("0x2", Some("0xaaa"), None, 1),
            tx("0x3", Some("0xaaa"), Some("0xbbb"), 1),
        ];
        let result = aggregate_transactions(&txs);
        let top = result.top_receiver.unwrap();
        assert_eq!(top.address, CONTRACT_CREATION);
        assert_eq!(top.count, 2);
    }

    #[test]
    fn missing_sender_counts_as_unknown() {
        let txs = vec![
            tx("0x1", None, Some("0xbbb"), 1),
            tx("0x2", None, Some("0xbbb"), 1),
        ];
        let result = aggregate_transactions(&txs);
        let top = result.top_sender.unwrap();
        assert_eq!(top.address, UNKNOWN_SENDER);
        assert_eq!(top.count, 2);
    }

    #[test]
    fn gas_price_tie_keeps_earliest_transaction() {
        let txs = vec![
            tx("0xfirst", Some("0xaaa"), Some("0xbbb"), 50),
            tx("0xsecond", Some("0xccc"), Some("0xddd"), 50),
        ];
        let result = aggregate_transactions(&txs);
        assert_eq!(result.max_gas_price_tx.unwrap().hash, "0xfirst");
    }

    #[test]
    fn gas_price_comparison_is_exact_above_64_bits() {
        let big = TxRecord {
            hash: "0xbig".to_string(),
            from: Some("0xaaa".to_string()),
            to: Some("0xbbb".to_string()),
            gas_price_wei: U256::MAX,
        };
        let slightly_smaller = TxRecord {
            hash: "0xsmall".to_string(),
            from: Some("0xccc".to_string()),
            to: Some("0xddd".to_string()),
            gas_price_wei: U256::MAX - U256::one(),
        };
        let result = aggregate_transactions(&[slightly_smaller, big]);
        assert_eq!(result.max_gas_price_tx.unwrap().hash, "0xbig");
    }

    #[test]
    fn worked_example_from_three_transactions() {
        // A sends twice, X receives twice, and the first of the two
        // gasPrice-50 transactions wins the max.
        let txs = vec![
            tx("0xt1", Some("0xa"), Some("0xx"), 10),
            tx("0xt2", Some("0xa"), Some("0xy"), 50),
            tx("0xt3", Some("0xb"), Some("0xx"), 50),
        ];
        let result = aggregate_transactions(&txs);

        let sender = result.top_sender.unwrap();
        assert_eq!(sender.address, "0xa");
        assert_eq!(sender.count, 2);

        let receiver = result.top_receiver.unwrap();
        assert_eq!(receiver.address, "0xx");
        assert_eq!(receiver.count, 2);

        assert_eq!(result.max_gas_price_tx.unwrap().hash, "0xt2");
    }
}
