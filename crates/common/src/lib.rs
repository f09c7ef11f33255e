//! Cross-crate helpers: logging setup, startup environment checks and
//! the small JSON payloads served outside the driver endpoints.

pub mod types;
pub mod utils;
pub mod env;
