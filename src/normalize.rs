use num_bigint::BigUint;

use crate::models::{NormalizedTransaction, RawTransaction};

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;
const ETHER_DECIMALS: usize = 18;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed value {value:?} in transaction {hash}")]
    MalformedValue { hash: String, value: String },
}

pub fn normalize_transactions(
    transactions: &[RawTransaction],
) -> Result<Vec<NormalizedTransaction>, NormalizeError> {
    transactions
        .iter()
        .map(|tx| {
            wei_hex_to_ether(&tx.value)
                .map(|value| NormalizedTransaction {
                    hash: tx.hash.clone(),
                    value,
                })
                .ok_or_else(|| NormalizeError::MalformedValue {
                    hash: tx.hash.clone(),
                    value: tx.value.clone(),
                })
        })
        .collect()
}

/// Converts a `0x`-prefixed hex wei quantity to ether.
///
/// The wei amount is parsed without a size limit and split into whole ether
/// and an 18 digit fraction, so the only rounding is the final decimal to
/// `f64` parse, which picks the nearest double. Returns `None` when the
/// prefix is missing, any remaining character is not a hex digit, or the
/// amount is too large for a finite `f64`.
pub fn wei_hex_to_ether(value: &str) -> Option<f64> {
    let digits = value.strip_prefix("0x")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let wei = BigUint::parse_bytes(digits.as_bytes(), 16)?;
    let divisor = BigUint::from(WEI_PER_ETHER);
    let whole = &wei / &divisor;
    let fraction = (&wei % &divisor).to_string();

    let decimal = format!(
        "{}.{}{}",
        whole,
        "0".repeat(ETHER_DECIMALS - fraction.len()),
        fraction
    );
    decimal.parse::<f64>().ok().filter(|ether| ether.is_finite())
}
