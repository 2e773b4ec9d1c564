//! Transifex client adapter.
//!
//! Remote entities are thin handles (an id plus a shared [`Session`]); every
//! method is one or more request/response round trips. Lookups return
//! `Option` so callers decide whether absence is fatal.
//!
//! The workflow only depends on the [`RemoteService`], [`RemoteProject`] and
//! [`RemoteResource`] traits.

mod model;
mod session;

pub use model::{Identifier, Language, LanguageStat, Object, translation_ratio};
pub use session::{API_BASE_URL, JobOutcome, Kind, MAX_POLLS, POLL_INTERVAL, Session};

use crate::error::{Result, TranslationError};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// i18n format of Qt `.ts` resources
const QT_I18N_FORMAT: &str = "QT";

/// Organization-level operations.
#[allow(async_fn_in_trait)]
pub trait RemoteService {
    type Project: RemoteProject;

    /// Look up a project by slug
    async fn project(&self, name: &str) -> Result<Option<Self::Project>>;

    /// Create a project. Public projects require a repository url.
    async fn create_project(
        &self,
        name: &str,
        source_lang: &str,
        private: bool,
        repository_url: Option<&str>,
    ) -> Result<Self::Project>;
}

/// Project-level operations.
#[allow(async_fn_in_trait)]
pub trait RemoteProject {
    type Resource: RemoteResource;

    fn slug(&self) -> &str;

    async fn resource(&self, slug: &str) -> Result<Option<Self::Resource>>;

    async fn create_resource(&self, slug: &str) -> Result<Self::Resource>;

    /// Target languages of the project
    async fn languages(&self) -> Result<Vec<Language>>;

    /// Per-language progress of `resource`; empty when it does not exist
    async fn language_stats(&self, resource: &str) -> Result<Vec<LanguageStat>>;

    /// Register target languages; unknown codes are skipped
    async fn add_languages(&self, codes: &[String]) -> Result<()>;
}

/// Resource-level operations.
#[allow(async_fn_in_trait)]
pub trait RemoteResource {
    fn slug(&self) -> &str;

    /// Replace the resource's source strings with `content`
    async fn upload(&self, content: &str) -> Result<()>;

    /// Write the translation of `lang` to `output_path`, decoded as UTF-8
    async fn download(&self, lang: &str, output_path: &Path) -> Result<()>;
}

/// Authenticated client bound to one organization.
#[derive(Debug, Clone)]
pub struct Client {
    session: Arc<Session>,
    organization: Object,
}

impl Client {
    /// Authenticate against the production API.
    pub async fn connect(organization: &str, token: &str) -> Result<Self> {
        Self::with_session(Session::new(token)?, organization).await
    }

    /// Resolve `organization` with an existing session.
    pub async fn with_session(session: Session, organization: &str) -> Result<Self> {
        let found = session
            .get_by_slug(None, Kind::Organization, organization)
            .await?
            .ok_or_else(|| {
                TranslationError::new(format!(
                    "The organization '{}' is not registered",
                    organization
                ))
            })?;

        log::debug!("Connected to organization {}", found.id);

        Ok(Self {
            session: Arc::new(session),
            organization: found,
        })
    }

    pub fn organization_id(&self) -> &str {
        &self.organization.id
    }
}

impl RemoteService for Client {
    type Project = Project;

    async fn project(&self, name: &str) -> Result<Option<Project>> {
        let found = self
            .session
            .get_by_slug(Some(&self.organization), Kind::Project, name)
            .await?;
        Ok(found.map(|object| Project::new(self.session.clone(), object, name)))
    }

    async fn create_project(
        &self,
        name: &str,
        source_lang: &str,
        private: bool,
        repository_url: Option<&str>,
    ) -> Result<Project> {
        let mut attributes = json!({
            "name": name,
            "slug": name,
            "private": private,
        });

        match repository_url {
            Some(url) => attributes["repository_url"] = json!(url),
            None if !private => {
                crate::bail!("A repository url is required for public projects")
            }
            None => {}
        }

        let language = self
            .session
            .get_by_slug(None, Kind::Language, source_lang)
            .await?
            .ok_or_else(|| TranslationError::new(format!("Unknown language '{}'", source_lang)))?;

        let relationships = json!({
            "organization": Identifier::new("organizations", &self.organization.id).to_relationship(),
            "source_language": Identifier::new("languages", language.id).to_relationship(),
        });

        log::info!("Creating project '{}'", name);
        let created = self
            .session
            .create(Kind::Project, attributes, relationships)
            .await?;

        Ok(Project::new(self.session.clone(), created, name))
    }
}

/// Handle on a Transifex project.
#[derive(Debug, Clone)]
pub struct Project {
    session: Arc<Session>,
    object: Object,
    slug: String,
}

impl Project {
    fn new(session: Arc<Session>, object: Object, slug: &str) -> Self {
        Self {
            session,
            object,
            slug: slug.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }
}

impl RemoteProject for Project {
    type Resource = Resource;

    fn slug(&self) -> &str {
        &self.slug
    }

    async fn resource(&self, slug: &str) -> Result<Option<Resource>> {
        let found = self
            .session
            .get_by_slug(Some(&self.object), Kind::Resource, slug)
            .await?;
        Ok(found.map(|object| Resource::new(self.session.clone(), object, slug)))
    }

    async fn create_resource(&self, slug: &str) -> Result<Resource> {
        log::info!("Creating resource '{}' in project '{}'", slug, self.slug);

        let created = self
            .session
            .create(
                Kind::Resource,
                json!({ "name": slug, "slug": slug }),
                json!({
                    "project": Identifier::new("projects", &self.object.id).to_relationship(),
                    "i18n_format": Identifier::new("i18n_formats", QT_I18N_FORMAT).to_relationship(),
                }),
            )
            .await?;

        Ok(Resource::new(self.session.clone(), created, slug))
    }

    async fn languages(&self) -> Result<Vec<Language>> {
        let path = format!("{}/{}/languages", Kind::Project.type_name(), self.object.id);
        let objects = self.session.list(&path, &[]).await?;
        Ok(objects.iter().filter_map(Language::from_object).collect())
    }

    async fn language_stats(&self, resource: &str) -> Result<Vec<LanguageStat>> {
        let Some(resource) = self.resource(resource).await? else {
            return Ok(Vec::new());
        };

        let objects = self
            .session
            .list(
                Kind::ResourceLanguageStats.type_name(),
                &[
                    ("filter[project]", self.object.id.as_str()),
                    ("filter[resource]", resource.object.id.as_str()),
                ],
            )
            .await?;

        Ok(objects.iter().filter_map(LanguageStat::from_object).collect())
    }

    async fn add_languages(&self, codes: &[String]) -> Result<()> {
        let mut members = Vec::new();
        for code in codes {
            match self.session.get_by_slug(None, Kind::Language, code).await? {
                Some(language) => members.push(Identifier::new("languages", language.id)),
                None => log::warn!("Skipping unknown language '{}'", code),
            }
        }

        if members.is_empty() {
            return Ok(());
        }

        log::info!("Adding {} languages to project '{}'", members.len(), self.slug);
        self.session
            .add_to_relationship(Kind::Project, &self.object, "languages", &members)
            .await
    }
}

/// Handle on a resource of a project.
#[derive(Debug, Clone)]
pub struct Resource {
    session: Arc<Session>,
    object: Object,
    slug: String,
}

impl Resource {
    fn new(session: Arc<Session>, object: Object, slug: &str) -> Self {
        Self {
            session,
            object,
            slug: slug.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }
}

impl RemoteResource for Resource {
    fn slug(&self) -> &str {
        &self.slug
    }

    async fn upload(&self, content: &str) -> Result<()> {
        let job = self
            .session
            .create(
                Kind::ResourceStringsUpload,
                json!({ "content": content, "content_encoding": "text" }),
                json!({
                    "resource": Identifier::new("resources", &self.object.id).to_relationship(),
                }),
            )
            .await?;

        self.session
            .wait_for_job(Kind::ResourceStringsUpload, &job)
            .await?;
        Ok(())
    }

    async fn download(&self, lang: &str, output_path: &Path) -> Result<()> {
        let job = self
            .session
            .create(
                Kind::ResourceTranslationsDownload,
                json!({
                    "content_encoding": "text",
                    "file_type": "default",
                    "mode": "default",
                    "pseudo": false,
                }),
                json!({
                    "resource": Identifier::new("resources", &self.object.id).to_relationship(),
                    "language": Identifier::new("languages", Kind::Language.child_id(None, lang)).to_relationship(),
                }),
            )
            .await?;

        let url = match self
            .session
            .wait_for_job(Kind::ResourceTranslationsDownload, &job)
            .await?
        {
            JobOutcome::Redirected(url) => url,
            JobOutcome::Succeeded => crate::bail!(
                "No download location returned for '{}' ({})",
                self.slug,
                lang
            ),
        };

        let bytes = self.session.fetch_bytes(&url).await?;
        tokio::fs::write(output_path, decode_utf8(&bytes)).await?;
        Ok(())
    }
}

/// Decode downloaded translations.
///
/// Transifex omits the charset of translation files and content sniffing
/// guesses Windows-1254, which mangles non-ASCII strings. The payload is
/// always UTF-8; invalid sequences are replaced rather than rejected.
pub fn decode_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
