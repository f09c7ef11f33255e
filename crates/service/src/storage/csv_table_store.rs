use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic CSV file-backed table of rows.
///
/// The file is the only state: every read loads the whole file and every
/// mutation rewrites it (header + one line per row) in row order. A missing
/// file reads as an empty table. An in-process `RwLock` serializes writers so
/// concurrent requests cannot interleave their load/modify/save cycles; other
/// processes writing the same file still race (last save wins). Writes go
/// straight to the target path, so a crash mid-write can truncate the file.
pub struct CsvTableStore<R> {
    file_path: PathBuf,
    lock: RwLock<()>,
    _rows: PhantomData<fn() -> R>,
}

impl<R> CsvTableStore<R>
where
    R: Serialize + DeserializeOwned + Send,
{
    /// Open a table at `path`. Nothing is read or created until first use.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into(), lock: RwLock::new(()), _rows: PhantomData })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load every row in file order.
    pub async fn load(&self) -> Result<Vec<R>, ServiceError> {
        let _guard = self.lock.read().await;
        self.read_rows().await
    }

    /// Replace the whole file with `rows`.
    pub async fn save(&self, rows: &[R]) -> Result<(), ServiceError> {
        let _guard = self.lock.write().await;
        self.write_rows(rows).await
    }

    /// Load, apply `f`, and persist the result under the write lock.
    ///
    /// If `f` fails the file is not rewritten.
    pub async fn update_rows<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<R>) -> Result<T, ServiceError>,
    {
        let _guard = self.lock.write().await;
        let mut rows = self.read_rows().await?;
        let out = f(&mut rows)?;
        self.write_rows(&rows).await?;
        Ok(out)
    }

    async fn read_rows(&self) -> Result<Vec<R>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %self.file_path.display(), "table file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ServiceError::storage(format!("read {}", self.file_path.display()), e)),
        };
        let rows = decode_rows(&bytes)?;
        debug!(file = %self.file_path.display(), rows = rows.len(), "table loaded");
        Ok(rows)
    }

    async fn write_rows(&self, rows: &[R]) -> Result<(), ServiceError> {
        let data = encode_rows(rows)?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::storage(format!("write {}", self.file_path.display()), e))?;
        debug!(file = %self.file_path.display(), rows = rows.len(), "table saved");
        Ok(())
    }
}

/// Parse CSV bytes with a header line into rows; columns are matched by header name.
pub fn decode_rows<R: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<R>, ServiceError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(|e| ServiceError::storage("decode csv", e))
}

/// Serialize rows to CSV bytes. The header is emitted with the first row, so
/// an empty table encodes to an empty file.
pub fn encode_rows<R: Serialize>(rows: &[R]) -> Result<Vec<u8>, ServiceError> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(|e| ServiceError::storage("encode csv", e))?;
    }
    writer.into_inner().map_err(|e| ServiceError::storage("flush csv", e.error()))
}
