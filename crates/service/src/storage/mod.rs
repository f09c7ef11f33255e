//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed table store. Each call re-reads the
//! file; nothing is cached between requests.

pub mod csv_table_store;
