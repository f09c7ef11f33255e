//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the directory for the drivers file exists.
pub async fn ensure_env(drivers_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(drivers_file).await
}
