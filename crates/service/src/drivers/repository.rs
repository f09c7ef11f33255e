use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use models::{Driver, DriverInput};

use super::row::DriverRow;
use crate::errors::ServiceError;
use crate::storage::csv_table_store::CsvTableStore;

/// Repository abstraction for driver persistence.
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Every driver, in insertion order.
    async fn load_all(&self) -> Result<Vec<Driver>, ServiceError>;
    /// Assign the next id, append, persist.
    async fn create(&self, input: DriverInput) -> Result<Driver, ServiceError>;
    /// Overwrite all mutable fields of `id`; `NotFound` leaves storage untouched.
    async fn update(&self, id: u64, input: DriverInput) -> Result<Driver, ServiceError>;
}

/// Max id + 1, or 1 for an empty table. Fails once `u64::MAX` is taken.
pub fn next_id<I: IntoIterator<Item = u64>>(ids: I) -> Result<u64, ServiceError> {
    match ids.into_iter().max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| ServiceError::Storage(format!("driver id space exhausted after {max}"))),
    }
}

/// CSV-file-backed repository.
pub struct CsvDriverRepository {
    store: Arc<CsvTableStore<DriverRow>>,
}

impl CsvDriverRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { store: CsvTableStore::new(path) }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

#[async_trait]
impl DriverRepository for CsvDriverRepository {
    async fn load_all(&self) -> Result<Vec<Driver>, ServiceError> {
        self.store
            .load()
            .await?
            .into_iter()
            .map(Driver::try_from)
            .collect()
    }

    async fn create(&self, input: DriverInput) -> Result<Driver, ServiceError> {
        self.store
            .update_rows(move |rows| {
                let id = next_id(rows.iter().map(|r| r.id))?;
                let driver = Driver::from_input(id, input);
                rows.push(DriverRow::from(&driver));
                Ok(driver)
            })
            .await
    }

    async fn update(&self, id: u64, input: DriverInput) -> Result<Driver, ServiceError> {
        self.store
            .update_rows(move |rows| {
                let row = rows
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| ServiceError::not_found("Driver"))?;
                // every mutable field is overwritten, so the old row is not decoded
                let driver = Driver::from_input(id, input);
                *row = DriverRow::from(&driver);
                Ok(driver)
            })
            .await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockDriverRepository {
        rows: Mutex<Vec<Driver>>,
    }

    impl MockDriverRepository {
        fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<Driver>>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Storage("mock repository poisoned".into()))
        }
    }

    #[async_trait]
    impl DriverRepository for MockDriverRepository {
        async fn load_all(&self) -> Result<Vec<Driver>, ServiceError> {
            Ok(self.rows()?.clone())
        }

        async fn create(&self, input: DriverInput) -> Result<Driver, ServiceError> {
            let mut rows = self.rows()?;
            let driver = Driver::from_input(next_id(rows.iter().map(|d| d.id))?, input);
            rows.push(driver.clone());
            Ok(driver)
        }

        async fn update(&self, id: u64, input: DriverInput) -> Result<Driver, ServiceError> {
            let mut rows = self.rows()?;
            let driver = rows
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| ServiceError::not_found("Driver"))?;
            driver.apply(input);
            Ok(driver.clone())
        }
    }
}
