//! Interactive numbered menu.
//!
//! Operation errors are printed and the loop carries on. Only console I/O
//! failures end the loop early. End of input behaves like choosing Exit.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::RosterError;
use crate::io::store::RecordStore;
use crate::mutate::{NewStudent, UpdateOutcome, add_student, is_abort, update_email};
use crate::query::{filter_by_course, find_student, list_all};

const MENU: &str = "\n=== Student Management System ===\n\
    1. Display all students\n\
    2. Display students by course\n\
    3. Add new student\n\
    4. Modify student email\n\
    5. Exit";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    ListAll,
    ByCourse,
    AddStudent,
    ModifyEmail,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::ListAll),
            "2" => Some(Self::ByCourse),
            "3" => Some(Self::AddStudent),
            "4" => Some(Self::ModifyEmail),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Menu session over a store and a pair of console streams.
pub struct Menu<'a, R, W> {
    store: &'a dyn RecordStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a dyn RecordStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Show the menu and dispatch choices until Exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(option) = self.prompt("\nSelect an option: ")? else {
                return Ok(());
            };
            debug!(option = %option, "menu choice");
            let flow = match Choice::parse(&option) {
                Some(Choice::ListAll) => self.list_all()?,
                Some(Choice::ByCourse) => self.by_course()?,
                Some(Choice::AddStudent) => self.add_student()?,
                Some(Choice::ModifyEmail) => self.modify_email()?,
                Some(Choice::Exit) => {
                    writeln!(self.output, "\nGoodbye!")?;
                    Flow::Quit
                }
                None => {
                    writeln!(self.output, "\nInvalid option. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    /// Print `text` and read one line without its line ending. `None` at end
    /// of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn list_all(&mut self) -> io::Result<Flow> {
        let rows = match list_all(self.store) {
            Ok(rows) => rows,
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(self.output, "\nName - Email - Course - Average Grade")?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        for row in rows {
            match row {
                Ok(line) => writeln!(self.output, "{line}")?,
                Err(err) => {
                    writeln!(self.output, "Error: {err}")?;
                    break;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn by_course(&mut self) -> io::Result<Flow> {
        let Some(course_id) = self.prompt("Enter course number (1-10): ")? else {
            return Ok(Flow::Quit);
        };
        match filter_by_course(self.store, &course_id) {
            Ok(listing) => {
                writeln!(self.output, "\n{}:", listing.course)?;
                for line in listing.lines() {
                    writeln!(self.output, "{line}")?;
                }
            }
            Err(err @ RosterError::CourseNotFound { .. }) => {
                writeln!(self.output, "\nError: {err}")?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_student(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Student name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.prompt("Student email: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(course_id) = self.prompt("Course number (1-10): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(grade) = self.prompt("Average grade (0 if none): ")? else {
            return Ok(Flow::Quit);
        };

        let student = NewStudent {
            name: &name,
            email: &email,
            course_id: &course_id,
            grade: &grade,
        };
        match add_student(self.store, &student) {
            Ok(record) => writeln!(self.output, "\nStudent {} successfully added.", record.name)?,
            Err(RosterError::Validation(message)) => writeln!(self.output, "Error: {message}")?,
            Err(err) => writeln!(self.output, "Error adding student: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn modify_email(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Student name (or 'exit' to return): ")? else {
            return Ok(Flow::Quit);
        };
        if is_abort(&name) {
            return Ok(Flow::Continue);
        }

        let current = match find_student(self.store, &name) {
            Ok(record) => record,
            Err(err @ RosterError::StudentNotFound { .. }) => {
                writeln!(self.output, "\n{err}")?;
                return Ok(Flow::Continue);
            }
            Err(err) => {
                writeln!(self.output, "Error modifying email: {err}")?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(self.output, "Current email: {}", current.email)?;
        let Some(new_email) = self.prompt("New email: ")? else {
            return Ok(Flow::Quit);
        };

        match update_email(self.store, &name, &new_email) {
            Ok(UpdateOutcome::Updated { .. }) => {
                writeln!(self.output, "\nEmail for {name} successfully updated.")?;
            }
            Ok(UpdateOutcome::Aborted) => {}
            Err(err @ RosterError::StudentNotFound { .. }) => writeln!(self.output, "\n{err}")?,
            Err(err) => writeln!(self.output, "Error modifying email: {err}")?,
        }
        Ok(Flow::Continue)
    }
}
