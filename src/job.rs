use crate::etherscan::{BlockSource, FetchError};
use crate::models::Report;
use crate::normalize::{normalize_transactions, NormalizeError};
use crate::report::build_report;

#[derive(thiserror::Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Fetches the latest block from `source` and builds its value report.
/// Any fetch or parse failure aborts the run; no partial report is returned.
pub async fn generate_report(source: &dyn BlockSource) -> Result<Report, JobError> {
    let block_number = source.latest_block_number().await?;
    tracing::info!("latest block: {}", block_number);

    let raw = source.transactions(block_number).await?;
    tracing::info!("block {}: {} transactions", block_number, raw.len());

    let normalized = normalize_transactions(&raw)?;
    let report = build_report(normalized);
    tracing::info!(
        "report for block {}: {} transactions, {} ETH total",
        block_number,
        report.total_transactions,
        report.total_value
    );

    Ok(report)
}
