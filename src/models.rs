use serde::{Deserialize, Serialize};

/// Transaction as returned inside an Etherscan `eth_getBlockByNumber` block.
/// Only the fields the report needs are kept; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    /// `0x`-prefixed hex quantity in wei.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTransaction {
    pub hash: String,
    /// Value in ether.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_transactions: usize,
    pub total_value: f64,
    pub transactions: Vec<NormalizedTransaction>,
}
