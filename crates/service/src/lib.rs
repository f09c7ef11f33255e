//! Service layer providing the driver CRUD operations on top of `models`.
//! - Separates business logic from file access.
//! - `storage` holds the generic CSV table store; `drivers` builds the
//!   repository and application service on it.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod drivers;
