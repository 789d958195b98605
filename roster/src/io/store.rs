//! Record store: the CSV file holding every student record.
//!
//! Operations take a `&dyn RecordStore` rather than a path so tests can swap
//! in an in-memory store. Each call opens, uses and closes the file; nothing is
//! cached between calls.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, WriterBuilder};
use tracing::{debug, info};

use crate::core::record::{HEADER, StudentRecord};
use crate::error::{Result, RosterError};

/// Lazy, fallible sequence of records.
pub type RecordScan<'a> = Box<dyn Iterator<Item = Result<StudentRecord>> + 'a>;

/// Full contents of a store: header row plus records in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub header: Vec<String>,
    pub records: Vec<StudentRecord>,
}

/// Persistence seam for student records.
pub trait RecordStore {
    /// Read the header and every record.
    fn read_all(&self) -> Result<StoreSnapshot>;

    /// Stream records one at a time. Each call starts from the top of the store.
    fn scan(&self) -> Result<RecordScan<'_>>;

    /// Add one record at the end of the store.
    fn append(&self, record: &StudentRecord) -> Result<()>;

    /// Replace the store contents with `header` followed by `records`.
    fn rewrite_all(&self, header: &[String], records: &[StudentRecord]) -> Result<()>;
}

/// [`RecordStore`] backed by a comma-separated file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    atomic_rewrite: bool,
}

impl CsvStore {
    /// Store at `path`, rewriting through a temp file + rename.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_rewrite: true,
        }
    }

    /// When false, rewrites truncate the store in place.
    pub fn with_atomic_rewrite(mut self, atomic_rewrite: bool) -> Self {
        self.atomic_rewrite = atomic_rewrite;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_rows(&self) -> Result<(Vec<String>, StringRecordsIntoIter<File>)> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RosterError::StoreNotFound {
                path: self.path.clone(),
            },
            _ => RosterError::io("open", &self.path, err),
        })?;
        let mut rows = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file)
            .into_records();
        let header = match rows.next() {
            Some(row) => parse_header(row.map_err(read_error)?)?,
            None => return Err(RosterError::parse(1, "missing header row")),
        };
        Ok((header, rows))
    }

    /// Bytes needed before a new row: `None` if the header must be written
    /// first, otherwise whether a newline is missing at the end of the file.
    fn append_prefix(&self) -> Result<Option<bool>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(RosterError::io("open", &self.path, err)),
        };
        let len = file
            .metadata()
            .map_err(|err| RosterError::io("stat", &self.path, err))?
            .len();
        if len == 0 {
            return Ok(None);
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .map_err(|err| RosterError::io("seek", &self.path, err))?;
        file.read_exact(&mut last)
            .map_err(|err| RosterError::io("read", &self.path, err))?;
        Ok(Some(last[0] != b'\n'))
    }
}

impl RecordStore for CsvStore {
    fn read_all(&self) -> Result<StoreSnapshot> {
        debug!(path = %self.path.display(), "reading store");
        let (header, rows) = self.open_rows()?;
        let records = rows
            .map(|row| row.map_err(read_error).and_then(parse_row))
            .collect::<Result<Vec<_>>>()?;
        debug!(records = records.len(), "store loaded");
        Ok(StoreSnapshot { header, records })
    }

    fn scan(&self) -> Result<RecordScan<'_>> {
        debug!(path = %self.path.display(), "scanning store");
        let (_, rows) = self.open_rows()?;
        Ok(Box::new(
            rows.map(|row| row.map_err(read_error).and_then(parse_row)),
        ))
    }

    fn append(&self, record: &StudentRecord) -> Result<()> {
        let prefix = self.append_prefix()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| RosterError::io("open", &self.path, err))?;
        if prefix == Some(true) {
            file.write_all(b"\n")
                .map_err(|err| RosterError::io("append to", &self.path, err))?;
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if prefix.is_none() {
            info!(path = %self.path.display(), "creating store with header");
            writer.write_record(HEADER)?;
        }
        writer.serialize(record)?;
        writer
            .flush()
            .map_err(|err| RosterError::io("append to", &self.path, err))?;
        debug!(path = %self.path.display(), name = %record.name, "record appended");
        Ok(())
    }

    fn rewrite_all(&self, header: &[String], records: &[StudentRecord]) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        writer.write_record(header)?;
        for record in records {
            writer.serialize(record)?;
        }
        let buf = writer
            .into_inner()
            .map_err(|err| RosterError::io("encode", &self.path, err.into_error()))?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            atomic = self.atomic_rewrite,
            "rewriting store"
        );
        if self.atomic_rewrite {
            write_atomic(&self.path, &buf)
        } else {
            fs::write(&self.path, &buf).map_err(|err| RosterError::io("write", &self.path, err))
        }
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);
    fs::write(&tmp_path, contents)
        .map_err(|err| RosterError::io("write temp store", &tmp_path, err))?;
    fs::rename(&tmp_path, path).map_err(|err| RosterError::io("replace store", path, err))
}

fn parse_header(row: StringRecord) -> Result<Vec<String>> {
    if row.len() != HEADER.len() {
        return Err(RosterError::parse(
            line_of(&row),
            format!("header must have {} columns, found {}", HEADER.len(), row.len()),
        ));
    }
    Ok(row.iter().map(str::to_string).collect())
}

fn parse_row(row: StringRecord) -> Result<StudentRecord> {
    let line = line_of(&row);
    if row.len() != HEADER.len() {
        return Err(RosterError::parse(
            line,
            format!("expected {} fields, found {}", HEADER.len(), row.len()),
        ));
    }
    let record: StudentRecord = row
        .deserialize(None)
        .map_err(|err| RosterError::parse(line, err.to_string()))?;
    let violations = record.violations();
    if !violations.is_empty() {
        return Err(RosterError::parse(line, violations.join("; ")));
    }
    Ok(record)
}

fn read_error(err: csv::Error) -> RosterError {
    let line = err.position().map_or(0, |pos| pos.line());
    RosterError::parse(line, err.to_string())
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map_or(0, |pos| pos.line())
}
