use crate::{data::student::Student, directory::ListFilters};
use serde::Deserialize;

/// Whether the form is creating a new record or editing an existing one. The
/// original email only exists while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        original_email: String,
    },
}

/// Everything the create/edit form holds, passed into and handed back from each
/// form handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub grade: String,
    mode: FormMode,
}

impl FormState {
    ///a blank form in create mode
    pub fn create() -> Self {
        Self::default()
    }

    pub fn editing(original_email: impl Into<String>, student: Student) -> Self {
        Self {
            name: student.name,
            email: student.email,
            grade: student.grade,
            mode: FormMode::Edit {
                original_email: original_email.into(),
            },
        }
    }

    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    ///the shadow identifier - empty unless editing
    pub fn original_email(&self) -> &str {
        match &self.mode {
            FormMode::Create => "",
            FormMode::Edit { original_email } => original_email,
        }
    }

    pub const fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Student"
        } else {
            "Add New Student"
        }
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Student"
        } else {
            "Add Student"
        }
    }

    pub fn to_student(&self) -> Student {
        Student {
            name: self.name.clone(),
            email: self.email.clone(),
            grade: self.grade.clone(),
        }
    }
}

/// The form as the browser posts it, along with the list controls so the list can
/// be refreshed with whatever filters are showing.
#[derive(Deserialize, Debug, Default)]
pub struct SubmittedForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub original_email: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub grade_filter: String,
}

impl SubmittedForm {
    pub fn into_parts(self) -> (FormState, ListFilters) {
        let mode = if self.original_email.is_empty() {
            FormMode::Create
        } else {
            FormMode::Edit {
                original_email: self.original_email,
            }
        };

        (
            FormState {
                name: self.name,
                email: self.email,
                grade: self.grade,
                mode,
            },
            ListFilters::new(self.search, self.grade_filter),
        )
    }
}
