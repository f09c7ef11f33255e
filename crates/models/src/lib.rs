//! Domain types for the driver registry.
//! - `Driver` is the single persisted entity.
//! - `DriverInput` is the create/update payload; ids are always store-assigned.
//! - `DriverFilter` carries the optional list predicates.

pub mod errors;
pub mod driver;

pub use driver::{Driver, DriverFilter, DriverInput, VehicleType};
