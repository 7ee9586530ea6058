use crate::{
    data::{EmailQuery, student::Student},
    directory::ListFilters,
    error::{MissingIdentifierSnafu, PanelResult},
    maud_conveniences::{DANGER_BUTTON, PRIMARY_BUTTON, SECONDARY_BUTTON, notice, subtitle},
    panel::controller::{DeleteOutcome, LIST_FAILED, ListOutcome, StudentDetails},
    state::{PanelState, PanelStatus},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

pub const NO_STUDENTS: &str = "No students found.";
pub const NOT_ENROLLED: &str = "Not enrolled in any activities";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";

const FILTER_CONTROLS: &str = "#search, #grade-filter";

fn email_vals(email: &str) -> String {
    serde_json::json!({ "email": email }).to_string()
}

pub fn render_student_list(outcome: &ListOutcome) -> Markup {
    match outcome {
        ListOutcome::Failed => notice(LIST_FAILED),
        ListOutcome::Students(students) if students.is_empty() => notice(NO_STUDENTS),
        ListOutcome::Students(students) => html! {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4" {
                @for (email, student) in students {
                    (render_student_card(email, student))
                }
            }
        },
    }
}

fn render_student_card(email: &str, student: &Student) -> Markup {
    let vals = email_vals(email);

    html! {
        div class="student-card rounded-lg shadow-md p-4 bg-gray-700 flex flex-col justify-between" {
            div class="student-info mb-4" {
                h4 class="text-lg font-semibold" {(student.name)}
                p { strong {"Email: "} (student.email) }
                p { strong {"Grade: "} (student.grade) }
            }
            div class="student-actions flex flex-row space-x-2" {
                button class={"view-btn " (SECONDARY_BUTTON)} data-email=(email) hx-get="/internal/students/view" hx-vals=(vals) hx-target="#student-modal" {
                    "View"
                }
                button class={"edit-btn " (PRIMARY_BUTTON)} data-email=(email) hx-get="/internal/form/edit" hx-vals=(vals) hx-target="#student-form-section" hx-swap="outerHTML show:#student-form-section:top" {
                    "Edit"
                }
                button class={"delete-btn " (DANGER_BUTTON)} data-email=(email) hx-delete="/internal/students" hx-vals=(vals) hx-include=(FILTER_CONTROLS) hx-target="#student-modal" {
                    "Delete"
                }
            }
        }
    }
}

fn render_overlay(content: Markup) -> Markup {
    html! {
        div id="student-modal-backdrop" class="modal fixed inset-0 bg-black/60 flex items-center justify-center" hx-get="/internal/overlay/close" hx-trigger="click target:#student-modal-backdrop" hx-target="#student-modal" {
            div class="modal-content bg-gray-800 rounded shadow-xl p-6 max-w-lg w-full relative" {
                span class="close absolute top-2 right-4 text-2xl cursor-pointer" hx-get="/internal/overlay/close" hx-target="#student-modal" {"×"}
                (content)
            }
        }
    }
}

fn render_details(StudentDetails {
    student,
    activities,
}: &StudentDetails) -> Markup {
    html! {
        h2 id="modal-student-name" class="text-2xl font-semibold mb-4" {(student.name)}
        div id="modal-student-info" class="mb-4" {
            p { strong {"Email: "} (student.email) }
            p { strong {"Grade: "} (student.grade) }
        }
        (subtitle("Activities"))
        div id="modal-student-activities" {
            @if activities.is_empty() {
                p { em {(NOT_ENROLLED)} }
            } @else {
                ul class="list-disc pl-6 space-y-2" {
                    @for activity in activities {
                        li {
                            strong {(activity.name)}
                            br;
                            (activity.description)
                            br;
                            em {(activity.schedule)}
                        }
                    }
                }
            }
        }
    }
}

fn render_delete_prompt(email: &str) -> Markup {
    let vals = serde_json::json!({ "email": email, "confirmed": true }).to_string();

    render_overlay(html! {
        (subtitle(DELETE_PROMPT))
        p class="mb-4" {(email)}
        div class="flex flex-row space-x-4" {
            button class=(DANGER_BUTTON) hx-delete="/internal/students" hx-vals=(vals) hx-include=(FILTER_CONTROLS) hx-target="#students-list" {
                "Delete"
            }
            button class=(SECONDARY_BUTTON) hx-get="/internal/overlay/close" hx-target="#student-modal" {
                "Cancel"
            }
        }
    })
}

pub async fn internal_get_students(
    State(state): State<PanelState>,
    Query(filters): Query<ListFilters>,
) -> Markup {
    render_student_list(&state.list(&filters).await)
}

pub async fn internal_get_student_view(
    State(state): State<PanelState>,
    PanelStatus(status): PanelStatus,
    Query(EmailQuery { email }): Query<EmailQuery>,
) -> PanelResult<Response> {
    snafu::ensure!(!email.is_empty(), MissingIdentifierSnafu);

    Ok(match state.view(&email, &status).await {
        Some(details) => render_overlay(render_details(&details)).into_response(),
        //the status feed carries the error, and nothing gets swapped
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn internal_close_overlay() -> Markup {
    html! {}
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    email: String,
    #[serde(default)]
    confirmed: bool,
    #[serde(default)]
    search: String,
    #[serde(default)]
    grade_filter: String,
}

pub async fn internal_delete_student(
    State(state): State<PanelState>,
    PanelStatus(status): PanelStatus,
    Query(DeleteQuery {
        email,
        confirmed,
        search,
        grade_filter,
    }): Query<DeleteQuery>,
) -> PanelResult<Response> {
    snafu::ensure!(!email.is_empty(), MissingIdentifierSnafu);

    let filters = ListFilters::new(search, grade_filter);
    let close_overlay = html! {
        div id="student-modal" hx-swap-oob="innerHTML" {}
    };

    Ok(match state.delete(&email, confirmed, &filters, &status).await {
        DeleteOutcome::NeedsConfirmation { email } => render_delete_prompt(&email).into_response(),
        DeleteOutcome::Deleted(list) => html! {
            (render_student_list(&list))
            (close_overlay)
        }
        .into_response(),
        DeleteOutcome::Failed => ([("HX-Reswap", "none")], close_overlay).into_response(),
    })
}
