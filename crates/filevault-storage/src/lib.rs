//! # filevault-storage
//!
//! Storage provider implementations for FileVault. The
//! [`filevault_core::traits::StorageProvider`] trait is implemented here
//! for the local filesystem, the only backend the system ships with.

pub mod providers;

pub use providers::local::LocalStorageProvider;
