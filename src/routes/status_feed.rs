use crate::{
    panel::status::{StatusKind, StatusMessage},
    state::PanelState,
};
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use maud::{Markup, html};
use serde::Deserialize;
use std::convert::Infallible;
use tokio_stream::{StreamExt, wrappers::WatchStream};
use uuid::Uuid;

pub fn render_status(message: Option<&StatusMessage>) -> Markup {
    match message {
        None => html! { p class="hidden" {} },
        Some(StatusMessage { text, kind, .. }) => {
            let colours = match kind {
                StatusKind::Success => "bg-green-100 border-green-400 text-green-700",
                StatusKind::Error => "bg-red-100 border-red-400 text-red-700",
            };
            html! {
                p role="status" class={(kind.as_str()) " border px-4 py-3 rounded " (colours)} {(text)}
            }
        }
    }
}

//`EventSource` can't set headers, so the feed is addressed by query
#[derive(Deserialize)]
pub struct PanelQuery {
    panel: Uuid,
}

///pushes one panel's status region whenever a message is shown or dismissed
pub async fn status_feed(
    State(state): State<PanelState>,
    Query(PanelQuery { panel }): Query<PanelQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.boards().board(panel).subscribe()).map(|message| {
        Ok(Event::default()
            .event("status")
            .data(render_status(message.as_ref()).into_string()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
