use crate::models::{NormalizedTransaction, Report};

/// Sorts by value (largest first) and totals the block. Equal values keep
/// their input order.
pub fn build_report(mut transactions: Vec<NormalizedTransaction>) -> Report {
    let total_transactions = transactions.len();

    transactions.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total_value = transactions.iter().fold(0.0, |acc, tx| acc + tx.value);

    Report {
        total_transactions,
        total_value,
        transactions,
    }
}
