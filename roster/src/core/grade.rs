//! Grade parsing and display.
//!
//! Grades are stored as text. The literal `0` is the "no grade" sentinel; any
//! other value is a score in `[0, 100]` written with two decimals.

use std::fmt;

/// Stored text of the "no grade" sentinel.
pub const NO_GRADE: &str = "0";

/// Label shown in place of the sentinel.
pub const NO_GRADE_LABEL: &str = "No grade";

/// Parsed view of a stored or entered grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grade {
    None,
    Score(f64),
}

impl Grade {
    /// Interpret a grade typed by the user.
    ///
    /// Only the exact input `0` is the sentinel; `0.0` is a score of zero.
    pub fn from_input(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input == NO_GRADE {
            return Ok(Self::None);
        }
        let value: f64 = input
            .parse()
            .map_err(|_| "Please enter a valid number".to_string())?;
        if !(0.0..=100.0).contains(&value) {
            return Err("Grade must be between 0 and 100".to_string());
        }
        Ok(Self::Score(value))
    }

    /// Interpret the grade column of a stored row.
    pub fn from_stored(raw: &str) -> Result<Self, String> {
        if raw == NO_GRADE {
            return Ok(Self::None);
        }
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("grade '{raw}' is not a number"))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("grade '{raw}' is outside 0-100"));
        }
        Ok(Self::Score(value))
    }

    /// Text written to the store for this grade.
    pub fn to_stored(self) -> String {
        match self {
            Self::None => NO_GRADE.to_string(),
            Self::Score(value) => format!("{value:.2}"),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(NO_GRADE_LABEL),
            Self::Score(value) => write!(f, "{value:.2}"),
        }
    }
}
