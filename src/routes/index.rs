use crate::{
    data::student::GRADES,
    maud_conveniences::{SECONDARY_BUTTON, render_page, title},
    panel::form_state::FormState,
    routes::{form::render_form, status_feed::render_status},
    state::{PANEL_HEADER, PanelState},
};
use axum::extract::State;
use maud::{Markup, html};

const FILTER_CLASSES: &str = "shadow border rounded w-full py-2 px-3 bg-gray-700 border-gray-600";

pub async fn get_index_route(State(state): State<PanelState>) -> Markup {
    //every page load is its own panel, with its own status line
    let (panel, _) = state.boards().open();
    let headers = serde_json::json!({ PANEL_HEADER: panel }).to_string();

    render_page(html! {
        div class="mx-auto max-w-5xl w-full flex flex-col space-y-4 px-4" hx-headers=(headers) {
            (title("Student Directory"))

            div id="form-message" sse-connect={"/status_feed?panel=" (panel)} sse-swap="status" {
                (render_status(None))
            }

            (render_form(&FormState::create()))

            div class="bg-gray-800 p-6 rounded shadow-md w-full" {
                div class="flex flex-row items-center space-x-4 mb-4" {
                    input type="search" id="search" name="search" placeholder="Search by name or email" hx-get="/internal/students" hx-trigger="input, search" hx-target="#students-list" hx-include="#grade-filter" class=(FILTER_CLASSES);
                    div class="w-48" {
                        select id="grade-filter" name="grade_filter" hx-get="/internal/students" hx-trigger="change" hx-target="#students-list" hx-include="#search" class=(FILTER_CLASSES) {
                            option value="" selected {"All Grades"}
                            @for grade in GRADES {
                                option value=(grade) {"Grade " (grade)}
                            }
                        }
                    }
                    a id="export-btn" href=(state.export_url()) class={"whitespace-nowrap " (SECONDARY_BUTTON)} {
                        "Export to CSV"
                    }
                }

                div id="students-list" hx-get="/internal/students" hx-trigger="load" hx-include="#search, #grade-filter" {
                    p class="italic text-gray-400" {"Loading students..."}
                }
            }

            div id="student-modal" {}
        }
    })
}
