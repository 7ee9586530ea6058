use crate::{
    config::RuntimeConfiguration,
    directory::{DirectoryApi, HttpDirectory},
    error::{PanelError, PanelResult},
    panel::{
        controller::PanelController,
        status::{StatusBoard, StatusBoards},
    },
};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::{ops::Deref, sync::Arc, time::Duration};
use uuid::Uuid;

///set on every htmx request by the page that owns it
pub const PANEL_HEADER: &str = "X-Panel-Id";

#[derive(Clone)]
pub struct PanelState {
    controller: PanelController,
    boards: StatusBoards,
}

impl PanelState {
    pub fn new(config: &RuntimeConfiguration) -> PanelResult<Self> {
        let directory = HttpDirectory::new(&config.directory_config())?;
        info!(base_url = %config.directory_config().base_url(), "Using directory");

        Ok(Self::with_directory(
            Arc::new(directory),
            config.status_lifetime(),
        ))
    }

    pub fn with_directory(directory: Arc<dyn DirectoryApi>, status_lifetime: Duration) -> Self {
        Self {
            controller: PanelController::new(directory),
            boards: StatusBoards::new(status_lifetime),
        }
    }

    pub const fn boards(&self) -> &StatusBoards {
        &self.boards
    }

    pub fn sensible_shutdown(&self) {
        self.boards.cancel_timers();
    }
}

impl Deref for PanelState {
    type Target = PanelController;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

/// The status board of the panel a request came from.
pub struct PanelStatus(pub StatusBoard);

impl FromRequestParts<PanelState> for PanelStatus {
    type Rejection = PanelError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &PanelState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(PANEL_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or(PanelError::MissingPanel)?;

        Ok(Self(state.boards().board(id)))
    }
}
