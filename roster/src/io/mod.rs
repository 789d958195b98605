//! I/O helpers: the record store and the config file.

pub mod config;
pub mod store;
