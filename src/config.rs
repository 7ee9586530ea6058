use crate::error::{
    InvalidUrlSnafu, MissingEnvVarSnafu, PanelResult, ParseNumberSnafu, UnsupportedSchemeSnafu,
};
use dotenvy::var;
use snafu::{OptionExt, ResultExt};
use std::{sync::Arc, time::Duration};
use url::Url;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_STATUS_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    directory_config: Arc<DirectoryConfig>,
    server_ip: String,
    status_lifetime: Duration,
}

impl RuntimeConfiguration {
    pub fn new() -> PanelResult<Self> {
        Self::from_lookup(|name| var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> PanelResult<Self> {
        let status_secs = match lookup("PANEL_STATUS_SECS") {
            Some(secs) => secs.trim().parse().context(ParseNumberSnafu {
                name: "PANEL_STATUS_SECS",
            })?,
            None => DEFAULT_STATUS_SECS,
        };

        Ok(Self {
            directory_config: Arc::new(DirectoryConfig::from_lookup(&lookup)?),
            server_ip: lookup("PANEL_SERVER_IP").unwrap_or_else(|| DEFAULT_SERVER_IP.to_string()),
            status_lifetime: Duration::from_secs(status_secs),
        })
    }

    pub fn directory_config(&self) -> Arc<DirectoryConfig> {
        self.directory_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn status_lifetime(&self) -> Duration {
        self.status_lifetime
    }
}

#[derive(Debug)]
pub struct DirectoryConfig {
    base_url: Url,
    request_timeout: Option<Duration>,
}

impl DirectoryConfig {
    fn from_lookup(lookup: &impl Fn(&'static str) -> Option<String>) -> PanelResult<Self> {
        let original = lookup("DIRECTORY_API_URL").context(MissingEnvVarSnafu {
            name: "DIRECTORY_API_URL",
        })?;
        let base_url = Url::parse(original.trim()).context(InvalidUrlSnafu {
            original: original.clone(),
        })?;
        snafu::ensure!(
            matches!(base_url.scheme(), "http" | "https"),
            UnsupportedSchemeSnafu {
                scheme: base_url.scheme()
            }
        );

        let request_timeout = lookup("PANEL_REQUEST_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim().parse().context(ParseNumberSnafu {
                    name: "PANEL_REQUEST_TIMEOUT_SECS",
                })
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
