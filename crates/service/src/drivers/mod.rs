//! Driver persistence and business operations.
//!
//! `row` maps drivers onto CSV lines, `repository` owns the backing file and
//! `service` exposes create/get/update/list to the HTTP layer.

pub mod row;
pub mod repository;
pub mod service;

pub use repository::{CsvDriverRepository, DriverRepository};
pub use service::DriverService;
