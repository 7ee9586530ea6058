use crate::{
    data::{EmailQuery, student::GRADES},
    error::{MissingIdentifierSnafu, PanelResult},
    maud_conveniences::{
        PRIMARY_BUTTON, SECONDARY_BUTTON, form_element, select_element, simple_form_element,
        subtitle,
    },
    panel::form_state::{FormState, SubmittedForm},
    routes::students::render_student_list,
    state::{PanelState, PanelStatus},
};
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

///the fixed grades, plus whatever free-text grade the student already has
fn grade_options(current: &str) -> impl Iterator<Item = (&str, String)> {
    let unlisted = (!current.is_empty() && !GRADES.contains(&current))
        .then(|| (current, current.to_string()));

    GRADES
        .iter()
        .map(|grade| (*grade, format!("Grade {grade}")))
        .chain(unlisted)
}

pub fn render_form(form: &FormState) -> Markup {
    html! {
        section id="student-form-section" class="bg-gray-800 p-6 rounded shadow-md w-full mb-8" {
            div id="form-title" {(subtitle(form.title()))}

            form id="student-form" hx-post="/internal/form" hx-target="#student-form-section" hx-swap="outerHTML" hx-include="#search, #grade-filter" {
                (simple_form_element("student-name", "name", "Name", None, &form.name))
                (simple_form_element("student-email", "email", "Email", Some("email"), &form.email))
                (form_element("student-grade", "Grade", select_element(
                    "student-grade",
                    "grade",
                    ("", "Select grade"),
                    grade_options(&form.grade),
                    &form.grade,
                )))

                input type="hidden" id="original-email" name="original_email" value=(form.original_email());

                div class="flex items-center space-x-4" {
                    button type="submit" id="submit-btn" class=(PRIMARY_BUTTON) {(form.submit_label())}
                    @if form.is_editing() {
                        button type="button" id="cancel-btn" class=(SECONDARY_BUTTON) hx-get="/internal/form/cancel" hx-target="#student-form-section" hx-swap="outerHTML" {
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

pub async fn internal_get_edit_form(
    State(state): State<PanelState>,
    PanelStatus(status): PanelStatus,
    Query(EmailQuery { email }): Query<EmailQuery>,
) -> PanelResult<Response> {
    snafu::ensure!(!email.is_empty(), MissingIdentifierSnafu);

    Ok(match state.begin_edit(&email, &status).await {
        Some(form) => render_form(&form).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn internal_get_cancel_form(
    State(state): State<PanelState>,
    PanelStatus(status): PanelStatus,
) -> Markup {
    render_form(&state.cancel(&status))
}

pub async fn internal_post_form(
    State(state): State<PanelState>,
    PanelStatus(status): PanelStatus,
    Form(submitted): Form<SubmittedForm>,
) -> Markup {
    let (form, filters) = submitted.into_parts();
    let outcome = state.submit(form, &filters, &status).await;

    html! {
        (render_form(&outcome.form))
        @if let Some(list) = &outcome.refreshed {
            div id="students-list" hx-swap-oob="innerHTML" {
                (render_student_list(list))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_grade_is_offered_and_kept() {
        let mut form = FormState::create();
        form.grade = "Kindergarten".into();

        let markup = render_form(&form).into_string();
        assert!(markup.contains("<option value=\"Kindergarten\" selected>Kindergarten</option>"));
        assert_eq!(markup.matches(" selected>").count(), 1);
    }

    #[test]
    fn listed_grade_is_not_repeated() {
        assert_eq!(grade_options("10").count(), GRADES.len());
        assert_eq!(grade_options("").count(), GRADES.len());
    }
}
