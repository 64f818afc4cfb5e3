//! # Core Module
//!
//! Fundamental concurrency primitives shared by the rest of the crate.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted container with read-write
//!   locking, used to share chunk block maps between the driving thread and
//!   in-flight chunk jobs

pub mod mt_resource;

pub use mt_resource::MtResource;
