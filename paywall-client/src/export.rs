//! Saving CSV exports to disk.

use crate::error::ApiResult;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resources the backend can export as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportResource {
    Customers,
    Communications,
    SupportTickets,
}

impl ExportResource {
    /// Prefix used in the saved file name.
    #[must_use]
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Communications => "communications",
            Self::SupportTickets => "support-tickets",
        }
    }
}

/// `<resource>-export-<YYYY-MM-DD>.csv`
#[must_use]
pub fn export_file_name(resource: &str, date: NaiveDate) -> String {
    format!("{resource}-export-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `bytes` into `dir`, creating it if needed. An existing file for
/// the same resource and day is overwritten.
pub async fn save_export(
    bytes: &[u8],
    dir: &Path,
    resource: &str,
    date: NaiveDate,
) -> ApiResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(resource, date));
    tokio::fs::write(&path, bytes).await?;
    info!("Saved {} byte export to {}", bytes.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            export_file_name(ExportResource::SupportTickets.file_prefix(), date),
            "support-tickets-export-2024-03-07.csv"
        );
    }
}
