//! Course id to label mapping.

/// Build the stored course label for a course id typed by the user.
///
/// Ids are nominally 1-10 but are never range-checked; whatever was typed is
/// embedded as-is.
pub fn course_label(course_id: &str) -> String {
    format!("Course{course_id}")
}
