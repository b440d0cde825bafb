//! Conversions between 18-decimal fixed-point token amounts and
//! human-readable decimals.

use ethers::types::{Address, H256, U256};
use ethers::utils::{format_ether, parse_bytes32_string, parse_ether};

use crate::error::RelayError;

/// Number of decimals used by the token (1 MTK = 10^18 units)
pub const TOKEN_DECIMALS: u32 = 18;

/// Convert an on-chain fixed-point value to a floating decimal.
///
/// Precision beyond what `f64` holds is lost, same as parsing the
/// formatted ether string.
pub fn to_decimal(value: U256) -> f64 {
    let formatted = format_ether(value);
    formatted.parse::<f64>().unwrap_or(f64::MAX)
}

/// Convert a human-readable decimal amount to its fixed-point representation
pub fn to_fixed_point(amount: f64) -> Result<U256, RelayError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RelayError::InvalidAmount(amount.to_string()));
    }

    // f64 Display never uses exponent notation, so the digits are all there
    let rendered = amount.to_string();
    let decimals = rendered
        .split_once('.')
        .map(|(_, frac)| frac.trim_end_matches('0').len())
        .unwrap_or(0);
    if decimals > TOKEN_DECIMALS as usize {
        return Err(RelayError::InvalidAmount(format!(
            "{}: more than {} decimals",
            rendered, TOKEN_DECIMALS
        )));
    }

    let value = parse_ether(&rendered)
        .map_err(|e| RelayError::InvalidAmount(format!("{}: {}", rendered, e)))?;
    if value.is_zero() && amount > 0.0 {
        return Err(RelayError::InvalidAmount(format!(
            "{}: below the smallest token unit",
            rendered
        )));
    }

    Ok(value)
}

/// Convert an amount that is already counted in base units (voting power)
/// without scaling. Fractions cannot be expressed on-chain and are rejected.
pub fn to_base_units(amount: f64) -> Result<U256, RelayError> {
    if !amount.is_finite() || amount < 0.0 || amount.fract() != 0.0 {
        return Err(RelayError::InvalidAmount(amount.to_string()));
    }
    if amount >= u128::MAX as f64 {
        return Err(RelayError::InvalidAmount(format!("{}: too large", amount)));
    }

    Ok(U256::from(amount as u128))
}

/// Decode a null-padded `bytes32` string as stored by the ballot contract
pub fn decode_bytes32(raw: &[u8; 32]) -> Result<String, RelayError> {
    parse_bytes32_string(raw)
        .map(str::to_string)
        .map_err(|e| RelayError::contract(format!("Invalid bytes32 string: {}", e)))
}

pub fn parse_address(address: &str) -> Result<Address, RelayError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|_| RelayError::InvalidAddress(address.to_string()))
}

pub fn parse_tx_hash(hash: &str) -> Result<H256, RelayError> {
    hash.trim()
        .parse::<H256>()
        .map_err(|_| RelayError::InvalidHash(hash.to_string()))
}

/// Proposal ids arrive as strings from the API; accept decimal or 0x-hex
pub fn parse_proposal_id(id: &str) -> Result<U256, RelayError> {
    let id = id.trim();
    let parsed = match id.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16).ok(),
        None => U256::from_dec_str(id).ok(),
    };
    parsed.ok_or_else(|| RelayError::InvalidAmount(format!("Invalid proposal id: {}", id)))
}

/// Render a hash the way explorers and receipts show it (full 0x-hex)
pub fn hash_hex(hash: &H256) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}
