use serde::{Deserialize, Serialize};

pub mod activity;
pub mod student;

/// `{message}` body the directory sends back for every successful mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: String,
}

/// Body of a non-2xx directory response. `detail` is optional on the wire, and
/// anything that isn't a plain string is treated as absent.
#[derive(Deserialize, Debug, Default)]
pub struct ApiRejection {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}
