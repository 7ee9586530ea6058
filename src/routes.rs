use crate::{
    routes::{
        form::{internal_get_cancel_form, internal_get_edit_form, internal_post_form},
        index::get_index_route,
        status_feed::status_feed,
        students::{
            internal_close_overlay, internal_delete_student, internal_get_student_view,
            internal_get_students,
        },
    },
    state::PanelState,
};
use axum::{
    Router,
    routing::{get, post},
};

pub mod form;
pub mod index;
pub mod status_feed;
pub mod students;

/// Every UI event the panel reacts to, and the handler it goes to.
pub fn router(state: PanelState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route(
            "/internal/students",
            get(internal_get_students).delete(internal_delete_student),
        )
        .route("/internal/students/view", get(internal_get_student_view))
        .route("/internal/overlay/close", get(internal_close_overlay))
        .route("/internal/form", post(internal_post_form))
        .route("/internal/form/edit", get(internal_get_edit_form))
        .route("/internal/form/cancel", get(internal_get_cancel_form))
        .route("/status_feed", get(status_feed))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::activity::Activity,
        directory::testing::{Call, Failure, FakeDirectory, student},
        panel::controller::{LIST_FAILED, VIEW_FAILED},
        routes::students::{DELETE_PROMPT, NOT_ENROLLED, NO_STUDENTS},
        state::PANEL_HEADER,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::CONTENT_TYPE, request::Builder},
    };
    use std::{sync::Arc, time::Duration};
    use tokio_stream::StreamExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    ///the router, its state, and one open panel to send requests from
    fn app(fake: &Arc<FakeDirectory>) -> (Router, PanelState, Uuid) {
        let state = PanelState::with_directory(fake.clone(), Duration::from_secs(5));
        let (panel, _) = state.boards().open();
        (router(state.clone()), state, panel)
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn from_panel(builder: Builder, panel: Uuid) -> Builder {
        builder.header(PANEL_HEADER, panel.to_string())
    }

    fn get(uri: &str, panel: Uuid) -> Request<Body> {
        from_panel(Request::get(uri), panel).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str, panel: Uuid) -> Request<Body> {
        from_panel(Request::delete(uri), panel)
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(body: &'static str, panel: Uuid) -> Request<Body> {
        from_panel(Request::post("/internal/form"), panel)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_listing_renders_no_results_and_no_buttons() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, panel) = app(&fake);

        let (status, body) = call(app, get("/internal/students", panel)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(NO_STUDENTS));
        assert!(!body.contains("<button"));
    }

    #[tokio::test]
    async fn one_student_renders_one_card_with_tagged_actions() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, get("/internal/students", panel)).await;

        assert_eq!(body.matches("class=\"student-card").count(), 1);
        for action in ["view-btn", "edit-btn", "delete-btn"] {
            assert!(body.contains(&format!("class=\"{action} ")));
        }
        assert_eq!(body.matches("data-email=\"a@x.com\"").count(), 3);
        assert!(body.contains(">View<") && body.contains(">Edit<") && body.contains(">Delete<"));
    }

    #[tokio::test]
    async fn list_query_controls_become_directory_filters() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, panel) = app(&fake);

        call(app, get("/internal/students?search=em&grade_filter=", panel)).await;

        assert_eq!(
            fake.calls(),
            vec![Call::List(crate::directory::ListFilters::new("em", ""))]
        );
    }

    #[tokio::test]
    async fn list_failure_renders_in_place_of_the_list() {
        let fake = Arc::new(FakeDirectory::default());
        fake.fail_with(Failure::Transport);
        let (app, _, panel) = app(&fake);

        let (status, body) = call(app, get("/internal/students", panel)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(LIST_FAILED));
    }

    #[tokio::test]
    async fn view_without_activities_says_not_enrolled() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, get("/internal/students/view?email=a%40x.com", panel)).await;

        assert!(body.contains("id=\"modal-student-name\""));
        assert!(body.contains(NOT_ENROLLED));
        assert!(!body.contains("<ul"));
    }

    #[tokio::test]
    async fn view_lists_activities() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        fake.set_activities(
            "a@x.com",
            vec![Activity {
                name: "Chess Club".into(),
                description: "Learn strategies and compete in chess tournaments".into(),
                schedule: "Fridays, 3:30 PM - 5:00 PM".into(),
            }],
        );
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, get("/internal/students/view?email=a%40x.com", panel)).await;

        assert!(body.contains("<strong>Chess Club</strong>"));
        assert!(body.contains("<em>Fridays, 3:30 PM - 5:00 PM</em>"));
        assert!(!body.contains(NOT_ENROLLED));
    }

    #[tokio::test]
    async fn failed_view_swaps_nothing() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, state, panel) = app(&fake);

        let (status, body) = call(
            app,
            get("/internal/students/view?email=ghost%40x.com", panel),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert!(state.boards().board(panel).current().is_some());
    }

    #[tokio::test]
    async fn panels_keep_their_status_to_themselves() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, state, first) = app(&fake);
        let (second, _) = state.boards().open();

        call(
            app.clone(),
            get("/internal/students/view?email=ghost%40x.com", first),
        )
        .await;
        assert_eq!(
            state.boards().board(first).current().map(|m| m.text),
            Some(VIEW_FAILED.to_string())
        );
        assert!(state.boards().board(second).current().is_none());

        //a fresh page never starts with someone else's message
        let (_, page) = call(app.clone(), Request::get("/").body(Body::empty()).unwrap()).await;
        assert!(!page.contains(VIEW_FAILED));

        //and the other panel's cancel leaves this one's message up
        call(app, get("/internal/form/cancel", second)).await;
        assert!(state.boards().board(first).current().is_some());
    }

    #[tokio::test]
    async fn requests_without_a_panel_are_bad_input() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, _) = app(&fake);

        let request = Request::get("/internal/students/view?email=a%40x.com")
            .header(PANEL_HEADER, "not-a-panel")
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn status_feed_pushes_the_rendered_region() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, panel) = app(&fake);

        call(
            app.clone(),
            get("/internal/students/view?email=ghost%40x.com", panel),
        )
        .await;

        let response = app
            .oneshot(
                Request::get(format!("/status_feed?panel={panel}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/event-stream");

        let mut frames = response.into_body().into_data_stream();
        let frame = frames.next().await.unwrap().unwrap();
        let frame = String::from_utf8(frame.to_vec()).unwrap();

        assert!(frame.contains("event: status"), "{frame}");
        assert!(frame.contains("role=\"status\""), "{frame}");
        assert!(frame.contains(VIEW_FAILED), "{frame}");
    }

    #[tokio::test]
    async fn missing_email_is_bad_input() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, panel) = app(&fake);

        let (status, _) = call(app, get("/internal/form/edit", panel)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn edit_form_carries_the_shadow_identifier() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, get("/internal/form/edit?email=a%40x.com", panel)).await;

        assert!(body.contains("name=\"original_email\" value=\"a@x.com\""));
        assert!(body.contains("Edit Student"));
        assert!(body.contains("Update Student"));
        assert!(body.contains("id=\"cancel-btn\""));
    }

    #[tokio::test]
    async fn edit_form_keeps_a_free_text_grade() {
        let fake = Arc::new(FakeDirectory::with_students([student(
            "K",
            "k@x.com",
            "Kindergarten",
        )]));
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, get("/internal/form/edit?email=k%40x.com", panel)).await;

        assert!(body.contains("<option value=\"Kindergarten\" selected>Kindergarten</option>"));
        assert!(!body.contains("<option value=\"\" selected>"));
    }

    #[tokio::test]
    async fn cancel_returns_a_blank_create_form() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, get("/internal/form/cancel", panel)).await;

        assert!(body.contains("Add New Student"));
        assert!(body.contains("name=\"original_email\" value=\"\""));
        assert!(!body.contains("id=\"cancel-btn\""));
    }

    #[tokio::test]
    async fn edit_submit_updates_original_and_refreshes_list_out_of_band() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "old@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let request = post_form(
            "name=A&email=new%40x.com&grade=10&original_email=old%40x.com&search=&grade_filter=",
            panel,
        );
        let (_, body) = call(app, request).await;

        assert_eq!(
            fake.calls()[0],
            Call::Update("old@x.com".into(), student("A", "new@x.com", "10"))
        );
        assert_eq!(fake.list_calls(), 1);
        assert!(body.contains("Add New Student"));
        assert!(body.contains("hx-swap-oob=\"innerHTML\""));
        assert!(body.contains("data-email=\"new@x.com\""));
    }

    #[tokio::test]
    async fn rejected_submit_keeps_what_was_typed() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let request = post_form("name=Dup&email=a%40x.com&grade=11&original_email=", panel);
        let (_, body) = call(app, request).await;

        assert!(body.contains("value=\"Dup\""));
        assert!(!body.contains("hx-swap-oob"));
        assert_eq!(fake.list_calls(), 0);
    }

    #[tokio::test]
    async fn delete_asks_before_doing_anything() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let (_, body) = call(app, delete("/internal/students?email=a%40x.com", panel)).await;

        assert!(body.contains(DELETE_PROMPT));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_relists_and_closes_the_prompt() {
        let fake = Arc::new(FakeDirectory::with_students([student("A", "a@x.com", "10")]));
        let (app, _, panel) = app(&fake);

        let (_, body) = call(
            app,
            delete("/internal/students?email=a%40x.com&confirmed=true", panel),
        )
        .await;

        assert_eq!(
            fake.calls(),
            vec![
                Call::Delete("a@x.com".into()),
                Call::List(crate::directory::ListFilters::default())
            ]
        );
        assert!(body.contains(NO_STUDENTS));
        assert!(body.contains("id=\"student-modal\" hx-swap-oob=\"innerHTML\""));
    }

    #[tokio::test]
    async fn failed_delete_leaves_the_list_alone() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, panel) = app(&fake);

        let response = app
            .oneshot(delete(
                "/internal/students?email=ghost%40x.com&confirmed=true",
                panel,
            ))
            .await
            .unwrap();

        assert_eq!(response.headers()["HX-Reswap"], "none");
        assert_eq!(fake.list_calls(), 0);
    }

    #[tokio::test]
    async fn index_renders_the_whole_panel() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, _) = app(&fake);

        let (_, body) = call(app, Request::get("/").body(Body::empty()).unwrap()).await;

        for id in [
            "form-message",
            "student-form-section",
            "search",
            "grade-filter",
            "export-btn",
            "students-list",
            "student-modal",
        ] {
            assert!(body.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(body.contains("href=\"http://directory.test/students/export/csv\""));
        assert!(body.contains("All Grades"));
        assert!(body.contains("hx-headers=\"{&quot;X-Panel-Id&quot;:&quot;"));
        assert!(body.contains("sse-connect=\"/status_feed?panel="));
        //the list loads itself; rendering the page asks the directory for nothing
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn grade_filter_reloads_the_list_on_its_own_change() {
        let fake = Arc::new(FakeDirectory::default());
        let (app, _, _) = app(&fake);

        let (_, body) = call(app, Request::get("/").body(Body::empty()).unwrap()).await;

        let select = body
            .split("<select id=\"grade-filter\"")
            .nth(1)
            .and_then(|rest| rest.split('>').next())
            .unwrap();
        assert!(select.contains("hx-get=\"/internal/students\""));
        assert!(select.contains("hx-trigger=\"change\""));
        assert!(select.contains("hx-include=\"#search\""));
    }
}
