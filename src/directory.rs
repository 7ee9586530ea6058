//! The Directory API: the external HTTP service that owns every student and
//! activity record. The panel holds no copy of its data; each call here is a fresh
//! request.

use crate::{
    config::DirectoryConfig,
    data::{
        ApiMessage, ApiRejection,
        activity::Activity,
        student::{Student, StudentListing},
    },
    error::{
        BuildClientSnafu, DecodeSnafu, DirectoryError, DirectoryResult, PanelResult,
        TransportSnafu,
    },
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::ResultExt;
use url::Url;

/// The two independent list controls. Empty means "no constraint".
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    #[serde(default)]
    pub search: String,
    #[serde(default, rename = "grade_filter")]
    pub grade: String,
}

impl ListFilters {
    pub fn new(search: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            grade: grade.into(),
        }
    }

    ///query parameters for the list request, leaving out any filter that is empty
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search));
        }
        if !self.grade.is_empty() {
            pairs.push(("grade", self.grade.as_str()));
        }
        pairs
    }
}

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_students(&self, filters: &ListFilters) -> DirectoryResult<StudentListing>;
    async fn get_student(&self, email: &str) -> DirectoryResult<Student>;
    async fn get_activities(&self, email: &str) -> DirectoryResult<Vec<Activity>>;
    async fn create_student(&self, student: &Student) -> DirectoryResult<ApiMessage>;
    async fn update_student(
        &self,
        original_email: &str,
        student: &Student,
    ) -> DirectoryResult<ApiMessage>;
    async fn delete_student(&self, email: &str) -> DirectoryResult<ApiMessage>;

    ///where the browser should navigate to download the export; never fetched by us
    fn export_url(&self) -> String;
}

#[derive(Clone, Debug)]
pub struct HttpDirectory {
    client: Client,
    base_url: Url,
}

impl HttpDirectory {
    pub fn new(config: &DirectoryConfig) -> PanelResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().context(BuildClientSnafu)?,
            base_url: config.base_url().clone(),
        })
    }

    ///`base/segment/segment`, each segment percent-encoded on its own
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn list_url(&self, filters: &ListFilters) -> Url {
        let mut url = self.url(&["students"]);
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> DirectoryResult<T> {
        let response = request
            .send()
            .await
            .context(TransportSnafu { url: url.as_str() })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiRejection>()
                .await
                .ok()
                .and_then(|rejection| rejection.detail);
            debug!(%url, %status, ?detail, "Directory rejected request");
            return Err(DirectoryError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .context(DecodeSnafu { url: url.as_str() })
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectory {
    async fn list_students(&self, filters: &ListFilters) -> DirectoryResult<StudentListing> {
        let url = self.list_url(filters);
        self.send(self.client.get(url.clone()), &url).await
    }

    async fn get_student(&self, email: &str) -> DirectoryResult<Student> {
        let url = self.url(&["students", email]);
        self.send(self.client.get(url.clone()), &url).await
    }

    async fn get_activities(&self, email: &str) -> DirectoryResult<Vec<Activity>> {
        let url = self.url(&["students", email, "activities"]);
        self.send(self.client.get(url.clone()), &url).await
    }

    async fn create_student(&self, student: &Student) -> DirectoryResult<ApiMessage> {
        let url = self.url(&["students"]);
        self.send(self.client.post(url.clone()).json(student), &url)
            .await
    }

    async fn update_student(
        &self,
        original_email: &str,
        student: &Student,
    ) -> DirectoryResult<ApiMessage> {
        let url = self.url(&["students", original_email]);
        self.send(self.client.put(url.clone()).json(student), &url)
            .await
    }

    async fn delete_student(&self, email: &str) -> DirectoryResult<ApiMessage> {
        let url = self.url(&["students", email]);
        self.send(self.client.delete(url.clone()), &url).await
    }

    fn export_url(&self) -> String {
        self.url(&["students", "export", "csv"]).into()
    }
}
