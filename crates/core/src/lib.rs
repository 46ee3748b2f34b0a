//! Domain layer for the Cradle course platform.
//!
//! Zero-I/O crate: shared types, the error taxonomy, role definitions,
//! enum validation for course content, upload constants, and pagination
//! helpers. Both the database and API crates depend on this.

pub mod course;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod session;
pub mod types;
pub mod uploads;
