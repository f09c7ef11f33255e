use std::sync::Arc;

use models::{Driver, DriverFilter, DriverInput};
use tracing::{info, instrument};

use crate::drivers::repository::DriverRepository;
use crate::errors::ServiceError;

/// Driver business service independent of web framework.
pub struct DriverService<R: DriverRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: DriverRepository + ?Sized> DriverService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a new driver; the id is assigned by the store.
    ///
    /// # Examples
    /// ```
    /// use service::drivers::{repository::mock::MockDriverRepository, DriverService};
    /// use models::DriverInput;
    /// use std::sync::Arc;
    /// let svc = DriverService::new(Arc::new(MockDriverRepository::default()));
    /// let amy = tokio_test::block_on(svc.create(DriverInput::new("Amy", "L1"))).unwrap();
    /// assert_eq!(amy.id, 1);
    /// assert!(amy.is_available);
    /// assert_eq!(amy.vehicle_type, None);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: DriverInput) -> Result<Driver, ServiceError> {
        let driver = self.repo.create(input).await?;
        info!(driver_id = driver.id, "driver_created");
        Ok(driver)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Driver, ServiceError> {
        self.repo
            .load_all()
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ServiceError::not_found("Driver"))
    }

    /// Replace every mutable field of driver `id`.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: u64, input: DriverInput) -> Result<Driver, ServiceError> {
        let driver = self.repo.update(id, input).await?;
        info!(driver_id = driver.id, "driver_updated");
        Ok(driver)
    }

    /// Drivers matching every set predicate, in store order.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &DriverFilter) -> Result<Vec<Driver>, ServiceError> {
        let all = self.repo.load_all().await?;
        if all.is_empty() {
            return Ok(all);
        }
        let total = all.len();
        let matched = filter.apply(all);
        info!(total, count = matched.len(), "drivers_listed");
        Ok(matched)
    }
}
