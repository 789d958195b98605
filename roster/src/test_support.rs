//! Test-only helpers for seeding stores.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::core::record::{HEADER, StudentRecord};
use crate::error::Result;
use crate::io::store::{CsvStore, RecordScan, RecordStore, StoreSnapshot};

/// Three records over two courses; Bob has no grade.
pub const SAMPLE_CSV: &str = "name,email,course,grade\n\
    Alice,alice@x.com,Course3,85.00\n\
    Bob,bob@x.com,Course1,0\n\
    Carol,carol@x.com,Course3,72.50\n";

/// Write `contents` to `students.csv` under `dir` and open it as a store.
pub fn seed_store(dir: &Path, contents: &str) -> CsvStore {
    let path = dir.join("students.csv");
    fs::write(&path, contents).expect("seed store");
    CsvStore::new(path)
}

/// Temp dir holding [`SAMPLE_CSV`]. Keep the `TempDir` alive while the store
/// is in use.
pub fn sample_store() -> (TempDir, CsvStore) {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = seed_store(temp.path(), SAMPLE_CSV);
    (temp, store)
}

/// In-memory [`RecordStore`] that counts reads and writes.
pub struct MemoryStore {
    header: Vec<String>,
    records: RefCell<Vec<StudentRecord>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl MemoryStore {
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            header: HEADER.iter().map(|column| column.to_string()).collect(),
            records: RefCell::new(records),
            reads: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl RecordStore for MemoryStore {
    fn read_all(&self) -> Result<StoreSnapshot> {
        self.reads.set(self.reads.get() + 1);
        Ok(StoreSnapshot {
            header: self.header.clone(),
            records: self.records.borrow().clone(),
        })
    }

    fn scan(&self) -> Result<RecordScan<'_>> {
        self.reads.set(self.reads.get() + 1);
        let records = self.records.borrow().clone();
        Ok(Box::new(records.into_iter().map(Ok)))
    }

    fn append(&self, record: &StudentRecord) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }

    fn rewrite_all(&self, _header: &[String], records: &[StudentRecord]) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}
