use std::time::Duration;

use anyhow::{Context, Result};
use ethers_core::types::{Block, BlockId, Transaction, H160, H256};
use ethers_providers::{Http, Middleware, Provider};
use url::Url;

use crate::errors::ProbeError;
use crate::models::{BlockRecord, TxRecord};

/// Thin wrapper around an ethers provider. Generic over [`Middleware`] so
/// tests can run against `Provider<MockProvider>` instead of a live endpoint.
#[derive(Clone)]
pub struct EthClient<M> {
    provider: M,
}

impl EthClient<Provider<Http>> {
    pub fn new(rpc_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(request_timeout)
            .build()
            .context("failed to build reqwest client")?;
        let url = Url::parse(rpc_url).context("invalid RPC endpoint URL")?;
        let transport = Http::new_with_client(url, client);
        let provider = Provider::new(transport);
        Ok(Self { provider })
    }
}

impl<M: Middleware> EthClient<M> {
    pub fn from_provider(provider: M) -> Self {
        Self { provider }
    }

    /// `eth_getTransactionByHash`: `Ok(None)` when the node knows nothing
    /// about the hash, `Err` only on transport/protocol failure.
    pub async fn transaction_by_hash(
        &self,
        hash: H256,
    ) -> Result<Option<Transaction>, ProbeError> {
        tracing::debug!("fetching transaction 0x{:x}", hash);
        self.provider
            .get_transaction(hash)
            .await
            .map_err(|err| ProbeError::fetch("inspect-tx", format!("0x{hash:x}"), err))
    }

    /// Fetches one block with full transaction bodies and normalizes it.
    /// `Ok(None)` when the block does not exist.
    pub async fn block_with_txs(
        &self,
        number: u64,
    ) -> Result<Option<BlockRecord>, ProbeError> {
        tracing::debug!("fetching block {} with full transactions", number);
        let block_id = BlockId::Number(number.into());
        let maybe_block = self
            .provider
            .get_block_with_txs(block_id)
            .await
            .map_err(|err| ProbeError::fetch("block-stats", format!("block {number}"), err))?;

        Ok(maybe_block.map(|block| normalize_block(block, number)))
    }
}

fn normalize_block(block: Block<Transaction>, requested_number: u64) -> BlockRecord {
    let number = block
        .number
        .map(|n| n.as_u64())
        .unwrap_or(requested_number);

    let transactions = block.transactions.iter().map(normalize_tx).collect();

    BlockRecord {
        number,
        transactions,
    }
}

pub fn normalize_tx(tx: &Transaction) -> TxRecord {
    TxRecord {
        hash: format!("0x{:x}", tx.hash),
        from: Some(address_to_lower_hex(tx.from)),
        to: tx.to.map(address_to_lower_hex),
        gas_price_wei: tx.gas_price.unwrap_or_default(),
    }
}

pub fn address_to_lower_hex(addr: H160) -> String {
    format!("0x{addr:x}")
}
