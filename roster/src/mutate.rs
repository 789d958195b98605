//! Operations that change the store.

use tracing::{debug, info};

use crate::core::course::course_label;
use crate::core::grade::Grade;
use crate::core::record::StudentRecord;
use crate::error::{Result, RosterError};
use crate::io::store::RecordStore;

/// Name input that cancels an email update.
pub const ABORT_SENTINEL: &str = "exit";

/// True if `input` is the abort sentinel, in any case.
pub fn is_abort(input: &str) -> bool {
    input.to_lowercase() == ABORT_SENTINEL
}

/// User-entered fields for a new record.
#[derive(Debug, Clone, Copy)]
pub struct NewStudent<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub course_id: &'a str,
    /// `0` for no grade, otherwise a number in `[0, 100]`.
    pub grade: &'a str,
}

/// Outcome of [`update_email`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The abort sentinel was given; the store was not touched.
    Aborted,
    /// The first matching record now carries the new email.
    Updated { name: String, previous_email: String },
}

/// Validate `student` and append it to the store.
///
/// Nothing is written if validation fails.
pub fn add_student(store: &dyn RecordStore, student: &NewStudent<'_>) -> Result<StudentRecord> {
    if student.name.is_empty() {
        return Err(RosterError::Validation(
            "Student name must not be empty".to_string(),
        ));
    }
    let grade = Grade::from_input(student.grade).map_err(RosterError::Validation)?;
    let record = StudentRecord::new(
        student.name,
        student.email,
        &course_label(student.course_id),
        grade,
    );
    store.append(&record)?;
    info!(name = %record.name, course = %record.course, "student added");
    Ok(record)
}

/// Replace the email of the first record whose name matches `name`, ignoring
/// case. Every other field and row is written back unchanged, in order.
///
/// The store is not written when no record matches.
pub fn update_email(store: &dyn RecordStore, name: &str, new_email: &str) -> Result<UpdateOutcome> {
    if is_abort(name) {
        debug!("email update aborted");
        return Ok(UpdateOutcome::Aborted);
    }
    let mut snapshot = store.read_all()?;
    let record = snapshot
        .records
        .iter_mut()
        .find(|record| record.name_matches(name))
        .ok_or_else(|| RosterError::StudentNotFound {
            name: name.to_string(),
        })?;
    let previous_email = std::mem::replace(&mut record.email, new_email.to_string());
    let updated_name = record.name.clone();

    store.rewrite_all(&snapshot.header, &snapshot.records)?;
    info!(name = %updated_name, "email updated");
    Ok(UpdateOutcome::Updated {
        name: updated_name,
        previous_email,
    })
}
