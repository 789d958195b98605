//! Read-only views over the store.

use tracing::debug;

use crate::core::course::course_label;
use crate::core::record::StudentRecord;
use crate::error::{Result, RosterError};
use crate::io::store::RecordStore;

/// Records sharing one course label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListing {
    pub course: String,
    pub records: Vec<StudentRecord>,
}

impl CourseListing {
    /// Rows formatted as `name - email - grade`.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(StudentRecord::course_line).collect()
    }
}

/// Every record formatted as `name - email - course - grade`, in file order.
///
/// The store is opened when this is called and rows are read as the iterator
/// advances; call again to start over. A malformed row yields an error item
/// after the rows that precede it.
pub fn list_all(store: &dyn RecordStore) -> Result<impl Iterator<Item = Result<String>> + '_> {
    let rows = store.scan()?;
    Ok(rows.map(|row| row.map(|record| record.list_line())))
}

/// Records whose course label is `Course<course_id>`.
///
/// The id is not range-checked. A course with no records is reported as
/// [`RosterError::CourseNotFound`], whether or not the id is in 1-10.
pub fn filter_by_course(store: &dyn RecordStore, course_id: &str) -> Result<CourseListing> {
    let course = course_label(course_id);
    let mut records = Vec::new();
    for row in store.scan()? {
        let record = row?;
        if record.course == course {
            records.push(record);
        }
    }
    debug!(course = %course, matches = records.len(), "filtered by course");
    if records.is_empty() {
        return Err(RosterError::CourseNotFound { course });
    }
    Ok(CourseListing { course, records })
}

/// First record whose name matches `name`, ignoring case.
pub fn find_student(store: &dyn RecordStore, name: &str) -> Result<StudentRecord> {
    for row in store.scan()? {
        let record = row?;
        if record.name_matches(name) {
            return Ok(record);
        }
    }
    Err(RosterError::StudentNotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SAMPLE_CSV, sample_store};

    #[test]
    fn list_all_formats_every_row() {
        let (_temp, store) = sample_store();
        let lines = list_all(&store)
            .expect("list")
            .collect::<Result<Vec<_>>>()
            .expect("rows");
        assert_eq!(
            lines,
            vec![
                "Alice - alice@x.com - Course3 - 85.00",
                "Bob - bob@x.com - Course1 - No grade",
                "Carol - carol@x.com - Course3 - 72.50",
            ]
        );
    }

    #[test]
    fn list_all_is_restartable_and_sees_new_rows() {
        let (_temp, store) = sample_store();
        assert_eq!(list_all(&store).expect("list").count(), 3);
        let record = StudentRecord::new(
            "Dan",
            "dan@x.com",
            "Course9",
            crate::core::grade::Grade::Score(60.0),
        );
        store.append(&record).expect("append");
        let lines: Vec<String> = list_all(&store)
            .expect("list")
            .collect::<Result<_>>()
            .expect("rows");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "Dan - dan@x.com - Course9 - 60.00");
    }

    #[test]
    fn filter_returns_matches_in_file_order() {
        let (_temp, store) = sample_store();
        let listing = filter_by_course(&store, "3").expect("filter");
        assert_eq!(listing.course, "Course3");
        assert_eq!(
            listing.lines(),
            vec!["Alice - alice@x.com - 85.00", "Carol - carol@x.com - 72.50"]
        );
    }

    #[test]
    fn filter_reports_unused_course_as_nonexistent() {
        let (_temp, store) = sample_store();
        for id in ["5", "11", "abc"] {
            let err = filter_by_course(&store, id).unwrap_err();
            assert_eq!(err.to_string(), format!("Course{id} does not exist."));
        }
    }

    #[test]
    fn find_student_ignores_case_and_takes_first_match() {
        let (_temp, store) = sample_store();
        store
            .append(&StudentRecord::new(
                "alice",
                "second@x.com",
                "Course2",
                crate::core::grade::Grade::None,
            ))
            .expect("append duplicate");
        let record = find_student(&store, "ALICE").expect("find");
        assert_eq!(record.email, "alice@x.com");
        assert!(matches!(
            find_student(&store, "Zed"),
            Err(RosterError::StudentNotFound { .. })
        ));
    }

    #[test]
    fn sample_matches_fixture_text() {
        let (_temp, store) = sample_store();
        let contents = std::fs::read_to_string(store.path()).expect("read");
        assert_eq!(contents, SAMPLE_CSV);
    }
}
