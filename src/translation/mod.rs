//! Translation workflow: push source strings, pull translations, and drive the
//! Qt tools.
//!
//! [`Translation`] holds a resolved remote project and runs pulls and pushes
//! against it. String extraction and compilation only touch local files and
//! live in free functions ([`update_strings`], [`compile_strings`]).

mod report;
mod selection;
#[cfg(test)]
pub(crate) mod testing;
mod tools;

pub use report::{LanguageReport, language_report};
pub use selection::select_languages;
pub use tools::{ToolOutput, compile_strings, update_strings};

use crate::client::{RemoteProject, RemoteResource, RemoteService};
use crate::config::Parameters;
use crate::error::{Result, TranslationError};
use std::path::PathBuf;

/// Synchronizes one resource of a remote project with the local i18n files.
#[derive(Debug)]
pub struct Translation<P> {
    project: P,
    resource: String,
    minimum_translation: Option<f64>,
    i18n_path: PathBuf,
    ts_path: PathBuf,
}

impl<P: RemoteProject> Translation<P> {
    /// Resolve the configured project.
    ///
    /// With `create_project`, a missing project is created (public, with the
    /// configured repository url) and given the selected languages.
    pub async fn new<S>(parameters: &Parameters, service: &S, create_project: bool) -> Result<Self>
    where
        S: RemoteService<Project = P>,
    {
        let mut project = service.project(&parameters.project).await?;

        if project.is_none() && create_project {
            let created = service
                .create_project(
                    &parameters.project,
                    &parameters.source_lang,
                    false,
                    Some(parameters.repository_url.as_str()),
                )
                .await?;

            if !parameters.selected_languages.is_empty() {
                created
                    .add_languages(&parameters.selected_languages)
                    .await?;
            }
            project = Some(created);
        }

        let project = project.ok_or_else(|| {
            TranslationError::new(format!("Failed to get project '{}'", parameters.project))
        })?;

        Ok(Self::with_project(project, parameters))
    }

    /// Wrap an already resolved project.
    pub fn with_project(project: P, parameters: &Parameters) -> Self {
        Self {
            project,
            resource: parameters.resource.clone(),
            minimum_translation: parameters.minimum_translation,
            i18n_path: parameters.i18n_path(),
            ts_path: parameters.translation_file_path(),
        }
    }

    pub fn project(&self) -> &P {
        &self.project
    }

    /// Download translations into `<i18n>/<resource>_<lang>.ts`.
    ///
    /// Languages are the project's languages, restricted to
    /// `selected_languages` when not empty and to those reaching the minimum
    /// translation ratio when one is configured. Downloads run in ascending
    /// language order and overwrite existing files. Returns the written
    /// paths.
    pub async fn pull(&self, selected_languages: &[String]) -> Result<Vec<PathBuf>> {
        let resource = self
            .project
            .resource(&self.resource)
            .await?
            .ok_or_else(|| {
                TranslationError::new(format!("Resource {} does not exist", self.resource))
            })?;

        let available: Vec<String> = self
            .project
            .languages()
            .await?
            .into_iter()
            .map(|language| language.code)
            .collect();
        log::info!("{} languages found for '{}'", available.len(), self.resource);

        let stats = match self.minimum_translation {
            Some(_) => self.project.language_stats(&self.resource).await?,
            None => Vec::new(),
        };

        let languages = select_languages(
            available,
            selected_languages,
            self.minimum_translation,
            &stats,
        );

        tokio::fs::create_dir_all(&self.i18n_path).await?;

        let mut written = Vec::with_capacity(languages.len());
        for lang in &languages {
            let ts_file = self.i18n_path.join(format!("{}_{}.ts", self.resource, lang));
            log::info!("Downloading translation file: {}", ts_file.display());
            resource.download(lang, &ts_file).await?;
            written.push(ts_file);
        }

        Ok(written)
    }

    /// Upload the local source strings file, creating the resource if needed.
    pub async fn push(&self) -> Result<()> {
        log::info!(
            "Pushing resource: {} from '{}'",
            self.resource,
            self.ts_path.display()
        );

        if !self.ts_path.exists() {
            crate::bail!("The file {} does not exist", self.ts_path.display());
        }
        let content = tokio::fs::read_to_string(&self.ts_path).await?;

        let resource = match self.project.resource(&self.resource).await? {
            Some(resource) => resource,
            None => self.project.create_resource(&self.resource).await?,
        };

        resource.upload(&content).await
    }
}
