// src/core/mod.rs
//! Shared services: configuration loading and file system access

pub mod config_manager;
pub mod fs_ops;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
