use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type PanelResult<T> = Result<T, PanelError>;
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PanelError {
    #[snafu(display("Missing env var `{}`", name))]
    MissingEnvVar { name: &'static str },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to parse directory URL {:?}", original))]
    InvalidUrl {
        source: url::ParseError,
        original: String,
    },
    #[snafu(display("Directory URL must be http or https, found {:?}", scheme))]
    UnsupportedScheme { scheme: String },
    #[snafu(display("Unable to build HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving the panel"))]
    Serve { source: std::io::Error },
    #[snafu(display("No student email was supplied"))]
    MissingIdentifier,
    #[snafu(display("Request did not say which panel it came from"))]
    MissingPanel,
}

/// Failures talking to the Directory API. These never leave the controller: they
/// become status messages or the list failure notice.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DirectoryError {
    #[snafu(display("Unable to reach the directory at {}", url))]
    Transport { source: reqwest::Error, url: String },
    #[snafu(display("Unable to decode directory response from {}", url))]
    Decode { source: reqwest::Error, url: String },
    #[snafu(display("Directory rejected the request with status {}: {:?}", status, detail))]
    Rejected { status: u16, detail: Option<String> },
}

impl DirectoryError {
    ///the server-supplied `detail`, only present on a rejection that carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => Some(detail.as_str()),
            _ => None,
        }
    }

    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let status_code = match &self {
            Self::MissingIdentifier | Self::MissingPanel => BI,
            Self::MissingEnvVar { .. }
            | Self::ParseNumber { .. }
            | Self::InvalidUrl { .. }
            | Self::UnsupportedScheme { .. }
            | Self::BuildClient { .. }
            | Self::BindListener { .. }
            | Self::Serve { .. } => ISE,
        };

        error!(?self, "Error!");
        (
            status_code,
            Html(html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Panel Error "}
                    span {(self.to_string())}
                }
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_only_comes_from_rejections() {
        let rejected = DirectoryError::Rejected {
            status: 400,
            detail: Some("Student with this email already exists".into()),
        };
        assert_eq!(
            rejected.detail(),
            Some("Student with this email already exists")
        );
        assert!(rejected.is_rejection());

        let bare = DirectoryError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(bare.detail(), None);

        let blank = DirectoryError::Rejected {
            status: 404,
            detail: Some(String::new()),
        };
        assert_eq!(blank.detail(), None);
    }

    #[test]
    fn missing_identifier_is_bad_input() {
        let response = PanelError::MissingIdentifier.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = PanelError::MissingPanel.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
