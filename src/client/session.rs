//! Authenticated HTTP session against the Transifex REST API (v3, JSON:API).
//!
//! Every call is a single request/response round trip awaited before the
//! next one starts. "Not found" answers to lookups come back as `None`;
//! other error statuses become [`Error::Api`].

use super::model::{Document, ErrorDocument, Identifier, Object};
use crate::error::{Error, Result, TranslationError};
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode, redirect};
use serde_json::{Value, json};
use std::time::Duration;

/// Production API endpoint
pub const API_BASE_URL: &str = "https://rest.api.transifex.com";

const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Delay between two status checks of an asynchronous job
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Status checks before giving up on an asynchronous job (5 minutes)
pub const MAX_POLLS: u32 = 150;

/// Remote object collections used by the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Organization,
    Project,
    Resource,
    Language,
    ResourceLanguageStats,
    ResourceStringsUpload,
    ResourceTranslationsDownload,
}

impl Kind {
    /// JSON:API type, also the collection path
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Organization => "organizations",
            Self::Project => "projects",
            Self::Resource => "resources",
            Self::Language => "languages",
            Self::ResourceLanguageStats => "resource_language_stats",
            Self::ResourceStringsUpload => "resource_strings_async_uploads",
            Self::ResourceTranslationsDownload => "resource_translations_async_downloads",
        }
    }

    /// Composite id prefix: `o:` for organizations, `p:` for projects, ...
    fn id_prefix(self) -> Option<&'static str> {
        match self {
            Self::Organization => Some("o"),
            Self::Project => Some("p"),
            Self::Resource => Some("r"),
            Self::Language => Some("l"),
            _ => None,
        }
    }

    /// Composite id of the child `slug` under `parent_id`.
    ///
    /// Organizations and languages are top-level: `o:<slug>`, `l:<code>`.
    /// Projects and resources nest: `o:<org>:p:<project>:r:<resource>`.
    pub fn child_id(self, parent_id: Option<&str>, slug: &str) -> String {
        let prefix = self.id_prefix().unwrap_or(self.type_name());
        match parent_id {
            Some(parent) => format!("{}:{}:{}", parent, prefix, slug),
            None => format!("{}:{}", prefix, slug),
        }
    }
}

/// Outcome of a finished asynchronous job
#[derive(Debug)]
pub enum JobOutcome {
    /// The job completed in place
    Succeeded,
    /// The job result is available at this URL
    Redirected(String),
}

/// HTTP session carrying the API token.
#[derive(Debug, Clone)]
pub struct Session {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        // Download jobs answer with a 303 whose Location is the file url
        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(concat!("qt-transifex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, JSONAPI_MEDIA_TYPE)
    }

    async fn send_document(&self, method: Method, url: &str, body: &Value) -> Result<Response> {
        let response = self
            .request(method, url)
            .header(CONTENT_TYPE, JSONAPI_MEDIA_TYPE)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;
        check(response).await
    }

    /// Fetch an object by id; `None` when the service answers 404.
    pub async fn get(&self, kind: Kind, id: &str) -> Result<Option<Object>> {
        let url = self.url(&format!("{}/{}", kind.type_name(), id));
        log::debug!("GET {}", url);

        let response = self.request(Method::GET, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: Document<Object> = check(response).await?.json().await?;
        Ok(Some(document.data))
    }

    /// Fetch the `kind` object named `slug` under `parent`.
    ///
    /// `parent` is `None` for top-level collections. Absence is a normal
    /// outcome and yields `None`.
    pub async fn get_by_slug(
        &self,
        parent: Option<&Object>,
        kind: Kind,
        slug: &str,
    ) -> Result<Option<Object>> {
        let id = kind.child_id(parent.map(|p| p.id.as_str()), slug);
        self.get(kind, &id).await
    }

    /// Fetch every page of a collection.
    pub async fn list(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Object>> {
        let url = self.url(path);
        log::debug!("GET {} {:?}", url, query);

        let mut response = self.request(Method::GET, &url).query(query).send().await?;
        let mut objects = Vec::new();

        loop {
            let page: Document<Vec<Object>> = check(response).await?.json().await?;
            objects.extend(page.data);

            match page.links.next {
                Some(next) => {
                    log::debug!("GET {}", next);
                    response = self.request(Method::GET, &next).send().await?;
                }
                None => break,
            }
        }

        Ok(objects)
    }

    /// Create an object and return it as stored by the service.
    pub async fn create(&self, kind: Kind, attributes: Value, relationships: Value) -> Result<Object> {
        let url = self.url(kind.type_name());
        log::debug!("POST {}", url);

        let body = json!({
            "data": {
                "type": kind.type_name(),
                "attributes": attributes,
                "relationships": relationships,
            }
        });

        let response = self.send_document(Method::POST, &url, &body).await?;
        let document: Document<Object> = response.json().await?;
        Ok(document.data)
    }

    /// Append objects to a to-many relationship of `object`.
    pub async fn add_to_relationship(
        &self,
        kind: Kind,
        object: &Object,
        relationship: &str,
        members: &[Identifier],
    ) -> Result<()> {
        let url = self.url(&format!(
            "{}/{}/relationships/{}",
            kind.type_name(),
            object.id,
            relationship
        ));
        log::debug!("POST {}", url);

        self.send_document(Method::POST, &url, &json!({ "data": members }))
            .await?;
        Ok(())
    }

    /// Poll an asynchronous job until it finishes.
    ///
    /// A failed job is reported with the errors the service attached to it;
    /// it is never resubmitted.
    pub async fn wait_for_job(&self, kind: Kind, job: &Object) -> Result<JobOutcome> {
        let url = self.url(&format!("{}/{}", kind.type_name(), job.id));

        for attempt in 1..=MAX_POLLS {
            let response = self.request(Method::GET, &url).send().await?;

            if response.status() == StatusCode::SEE_OTHER {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or_else(|| Error::Api {
                        status: StatusCode::SEE_OTHER.as_u16(),
                        detail: format!("{} job {} redirected without location", kind.type_name(), job.id),
                    })?;
                return Ok(JobOutcome::Redirected(location.to_string()));
            }

            let document: Document<Object> = check(response).await?.json().await?;
            match document.data.attr_str("status") {
                Some("succeeded") => return Ok(JobOutcome::Succeeded),
                Some("failed") => {
                    let errors = document
                        .data
                        .attributes
                        .get("errors")
                        .map(Value::to_string)
                        .unwrap_or_default();
                    return Err(TranslationError::new(format!(
                        "{} job {} failed: {}",
                        kind.type_name(),
                        job.id,
                        errors
                    ))
                    .into());
                }
                status => {
                    log::debug!(
                        "{} job {} is {} (check {}/{})",
                        kind.type_name(),
                        job.id,
                        status.unwrap_or("pending"),
                        attempt,
                        MAX_POLLS
                    );
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(TranslationError::new(format!(
            "{} job {} did not finish after {} checks",
            kind.type_name(),
            job.id,
            MAX_POLLS
        ))
        .into())
    }

    /// Download a file from a generated (pre-signed) url.
    ///
    /// No credentials are sent: the url carries its own authorization.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading {}", url);
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn an error status into [`Error::Api`], keeping the service's details.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorDocument>(&text) {
        Ok(document) if !document.errors.is_empty() => document.summary(),
        _ => text,
    };

    Err(Error::Api {
        status: status.as_u16(),
        detail,
    })
}
