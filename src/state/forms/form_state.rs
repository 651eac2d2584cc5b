//! Form state management and the patient intake form

use super::field::FormField;
use super::options;
use crate::state::PatientRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Raised at submit time when a required field is not populated.
///
/// Checked in field order, so when both fields are missing the name is
/// reported first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: patient name is missing")]
    MissingName,
    #[error("Please fill in all required fields: age is not selected")]
    MissingAge,
}

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The patient information form: name, age select, optional record file
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub name: FormField,
    pub age: FormField,
    pub file: FormField,
    pub active_field_index: usize,
}

impl PatientForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Patient Name"),
            age: FormField::age("age", "Age"),
            file: FormField::file("file", "Medical Records"),
            active_field_index: 0,
        }
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == 3
    }

    /// Move the age selection up by `step` options
    pub fn age_select_prev(&mut self, step: usize) {
        let index = self.age.age_index();
        self.age.set_age_index(index.saturating_sub(step));
    }

    /// Move the age selection down by `step` options
    pub fn age_select_next(&mut self, step: usize) {
        let index = self.age.age_index();
        self.age.set_age_index(index + step);
    }

    /// Route a typed character to the active field
    pub fn input_char(&mut self, c: char, shift: bool) {
        let ch = if shift { c.to_ascii_uppercase() } else { c };
        match self.active_field_index {
            0 => self.name.push_char(ch),
            1 => {
                // Typing a digit jumps the select to that age
                if let Some(d) = c.to_digit(10) {
                    self.age.set_age_index(d as usize + 1);
                }
            }
            _ => {}
        }
    }

    /// Store a picked record file, replacing any previous selection
    pub fn select_file(&mut self, path: PathBuf) {
        self.file.set_file(path);
    }

    /// Validate required fields and build the submission payload.
    ///
    /// Leaves the form untouched; a failed submit must not change state.
    pub fn to_record(&self) -> Result<PatientRecord, ValidationError> {
        if self.name.as_text().is_empty() {
            return Err(ValidationError::MissingName);
        }
        let Some(age) = options::age_value(self.age.age_index()) else {
            return Err(ValidationError::MissingAge);
        };
        Ok(PatientRecord {
            name: self.name.as_text().to_string(),
            age,
            file: self.file.as_file().map(|p| p.to_path_buf()),
        })
    }

    /// Run the submit-time validation without building a payload
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_record().map(|_| ())
    }
}

impl Default for PatientForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PatientForm {
    fn field_count(&self) -> usize {
        4 // name, age, file, submit button row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.age,
            // For the submit row (index 3), return file as dummy (won't be used for input)
            _ => &mut self.file,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.age),
            2 => Some(&self.file),
            // Index 3 is the submit row, no FormField for it
            _ => None,
        }
    }
}
