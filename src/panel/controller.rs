use crate::{
    data::{
        activity::Activity,
        student::{Student, StudentListing},
    },
    directory::{DirectoryApi, ListFilters},
    error::DirectoryError,
    panel::{form_state::FormState, status::StatusBoard},
};
use std::sync::Arc;

pub const LIST_FAILED: &str = "Failed to load students. Please try again later.";
pub const VIEW_FAILED: &str = "Failed to load student details.";
pub const EDIT_FAILED: &str = "Failed to load student for editing.";
pub const SAVE_REJECTED: &str = "An error occurred";
pub const SAVE_FAILED: &str = "Failed to save student. Please try again.";
pub const DELETE_REJECTED: &str = "Failed to delete student";
pub const DELETE_FAILED: &str = "Failed to delete student. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Students(StudentListing),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub student: Student,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    ///the form to show next - reset on success, as submitted otherwise
    pub form: FormState,
    ///the fresh list, only after a successful save
    pub refreshed: Option<ListOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NeedsConfirmation { email: String },
    Deleted(ListOutcome),
    Failed,
}

/// Drives every panel operation against the directory. Failures are turned into
/// messages on the calling panel's status board and go no further.
#[derive(Clone)]
pub struct PanelController {
    directory: Arc<dyn DirectoryApi>,
}

impl PanelController {
    pub fn new(directory: Arc<dyn DirectoryApi>) -> Self {
        Self { directory }
    }

    pub async fn list(&self, filters: &ListFilters) -> ListOutcome {
        match self.directory.list_students(filters).await {
            Ok(students) => {
                debug!(count = students.len(), ?filters, "Listed students");
                ListOutcome::Students(students)
            }
            Err(e) => {
                error!(?e, ?filters, "Error fetching students");
                ListOutcome::Failed
            }
        }
    }

    ///both requests must succeed for the overlay to open
    pub async fn view(&self, email: &str, status: &StatusBoard) -> Option<StudentDetails> {
        let fetched = async {
            let student = self.directory.get_student(email).await?;
            let activities = self.directory.get_activities(email).await?;
            Ok::<_, DirectoryError>(StudentDetails {
                student,
                activities,
            })
        }
        .await;

        match fetched {
            Ok(details) => Some(details),
            Err(e) => {
                error!(?e, %email, "Error viewing student");
                status.error(VIEW_FAILED);
                None
            }
        }
    }

    ///`None` leaves the form exactly as it was
    pub async fn begin_edit(&self, email: &str, status: &StatusBoard) -> Option<FormState> {
        match self.directory.get_student(email).await {
            Ok(student) => Some(FormState::editing(email, student)),
            Err(e) => {
                error!(?e, %email, "Error loading student");
                status.error(EDIT_FAILED);
                None
            }
        }
    }

    pub fn cancel(&self, status: &StatusBoard) -> FormState {
        status.hide();
        FormState::create()
    }

    pub async fn submit(
        &self,
        form: FormState,
        filters: &ListFilters,
        status: &StatusBoard,
    ) -> SubmitOutcome {
        let student = form.to_student();
        let result = if form.is_editing() {
            self.directory
                .update_student(form.original_email(), &student)
                .await
        } else {
            self.directory.create_student(&student).await
        };

        match result {
            Ok(reply) => {
                info!(email = %student.email, editing = form.is_editing(), "Saved student");
                let reset = self.cancel(status);
                status.success(reply.message);
                SubmitOutcome {
                    form: reset,
                    refreshed: Some(self.list(filters).await),
                }
            }
            Err(e) => {
                if e.is_rejection() {
                    warn!(?e, "Directory refused to save student");
                    status.error(e.detail().unwrap_or(SAVE_REJECTED));
                } else {
                    error!(?e, "Error saving student");
                    status.error(SAVE_FAILED);
                }
                SubmitOutcome {
                    form,
                    refreshed: None,
                }
            }
        }
    }

    pub async fn delete(
        &self,
        email: &str,
        confirmed: bool,
        filters: &ListFilters,
        status: &StatusBoard,
    ) -> DeleteOutcome {
        if !confirmed {
            return DeleteOutcome::NeedsConfirmation {
                email: email.to_string(),
            };
        }

        match self.directory.delete_student(email).await {
            Ok(reply) => {
                info!(%email, "Deleted student");
                status.success(reply.message);
                DeleteOutcome::Deleted(self.list(filters).await)
            }
            Err(e) => {
                if e.is_rejection() {
                    warn!(?e, %email, "Directory refused to delete student");
                    status.error(e.detail().unwrap_or(DELETE_REJECTED));
                } else {
                    error!(?e, %email, "Error deleting student");
                    status.error(DELETE_FAILED);
                }
                DeleteOutcome::Failed
            }
        }
    }

    pub fn export_url(&self) -> String {
        self.directory.export_url()
    }
}
