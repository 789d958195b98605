//! Menu-driven viewer and editor for a CSV file of student records.
//!
//! - **[`core`]**: Pure record logic (grades, course labels, row formatting).
//! - **[`io`]**: The CSV record store and the TOML config file.
//!
//! [`query`] and [`mutate`] implement the operations on top of an injected
//! [`io::store::RecordStore`]; [`menu`] wires them to a console.

pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod menu;
pub mod mutate;
pub mod query;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
