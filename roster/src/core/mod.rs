//! Pure record logic shared by the store and the operations.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod course;
pub mod grade;
pub mod record;
