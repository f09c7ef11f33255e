//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Make sure the directory holding `data_file` exists, and report whether the
/// file itself is already there. A missing file is fine: the store treats it as empty.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    match tokio::fs::metadata(data_file).await {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow::anyhow!("{} is a directory, expected a CSV file", data_file.display()));
        }
        Ok(meta) => info!(file = %data_file.display(), bytes = meta.len(), "using existing data file"),
        Err(_) => warn!(file = %data_file.display(), "data file not found; starting with an empty store"),
    }
    Ok(())
}
