use ethers_core::abi::{Function, Param, ParamType, StateMutability, Token};
use ethers_core::types::{Address, Bytes, H256, U256};
use ethers_providers::Middleware;

use crate::errors::ProbeError;
use crate::eth::{address_to_lower_hex, EthClient};

/// The fields reported for an inspected transaction. `to` is `None` for
/// contract-creation transactions.
#[derive(Debug, Clone)]
pub struct TxReport {
    pub to: Option<String>,
    pub gas_price_wei: U256,
    pub input: String,
}

/// Fetches one transaction by hash. A hash the node knows nothing about is
/// surfaced as [`ProbeError::NotFound`], never defaulted.
pub async fn inspect<M: Middleware>(
    client: &EthClient<M>,
    tx_hash: H256,
) -> Result<TxReport, ProbeError> {
    let tx = client
        .transaction_by_hash(tx_hash)
        .await?
        .ok_or_else(|| ProbeError::NotFound(format!("0x{tx_hash:x}")))?;

    Ok(TxReport {
        to: tx.to.map(address_to_lower_hex),
        gas_price_wei: tx.gas_price.unwrap_or_default(),
        input: tx.input.to_string(),
    })
}

/// Encodes `transfer(address,uint256)` call data for an ERC-20 token,
/// scaling the whole-token amount by `10^token_decimals` in U256 so the
/// arithmetic stays exact (no float, no 64-bit truncation).
pub fn build_transfer_payload(
    token_decimals: u32,
    amount_whole: u64,
    to_address: &str,
) -> Result<Bytes, ProbeError> {
    let to: Address = to_address.parse().map_err(|err| {
        ProbeError::Encoding(format!("invalid recipient address {to_address}: {err}"))
    })?;

    let scale = U256::from(10u8)
        .checked_pow(U256::from(token_decimals))
        .ok_or_else(|| {
            ProbeError::Encoding(format!("10^{token_decimals} overflows uint256"))
        })?;
    let amount = U256::from(amount_whole).checked_mul(scale).ok_or_else(|| {
        ProbeError::Encoding(format!(
            "{amount_whole} * 10^{token_decimals} overflows uint256"
        ))
    })?;

    let data = erc20_transfer()
        .encode_input(&[Token::Address(to), Token::Uint(amount)])
        .map_err(|err| ProbeError::Encoding(err.to_string()))?;

    Ok(Bytes::from(data))
}

// `Function::constant` is deprecated in ethabi but still a struct field.
#[allow(deprecated)]
fn erc20_transfer() -> Function {
    Function {
        name: "transfer".to_string(),
        inputs: vec![
            Param {
                name: "_to".to_string(),
                kind: ParamType::Address,
                internal_type: None,
            },
            Param {
                name: "_value".to_string(),
                kind: ParamType::Uint(256),
                internal_type: None,
            },
        ],
        outputs: vec![Param {
            name: String::new(),
            kind: ParamType::Bool,
            internal_type: None,
        }],
        constant: None,
        state_mutability: StateMutability::NonPayable,
    }
}
