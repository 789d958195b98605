//! Student record type shared by the store and the operations.

use serde::{Deserialize, Serialize};

use super::grade::Grade;

/// Canonical header row of a store file.
pub const HEADER: [&str; 4] = ["name", "email", "course", "grade"];

/// One row of the store.
///
/// `grade` holds the stored text so rows that are not edited are written back
/// exactly as they were read. Use [`StudentRecord::grade`] for the parsed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    pub course: String,
    #[serde(rename = "grade")]
    pub grade_text: String,
}

impl StudentRecord {
    pub fn new(name: &str, email: &str, course: &str, grade: Grade) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
            grade_text: grade.to_stored(),
        }
    }

    /// Parsed grade. Records loaded through the store have already been
    /// checked, so this only fails for hand-built records.
    pub fn grade(&self) -> Result<Grade, String> {
        Grade::from_stored(&self.grade_text)
    }

    /// Check record invariants, returning every violation.
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push("name must not be empty".to_string());
        }
        if self.course.is_empty() {
            errors.push("course must not be empty".to_string());
        }
        if let Err(err) = self.grade() {
            errors.push(err);
        }
        errors
    }

    /// Case-insensitive exact match on the name.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// `name - email - course - grade`, as shown by the full listing.
    pub fn list_line(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.name,
            self.email,
            self.course,
            self.display_grade()
        )
    }

    /// `name - email - grade`, as shown under a course heading.
    pub fn course_line(&self) -> String {
        format!("{} - {} - {}", self.name, self.email, self.display_grade())
    }

    fn display_grade(&self) -> String {
        match self.grade() {
            Ok(grade) => grade.to_string(),
            Err(_) => self.grade_text.clone(),
        }
    }
}
