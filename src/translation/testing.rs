//! In-memory remote service for workflow tests.

use crate::client::{Language, LanguageStat, RemoteProject, RemoteResource, RemoteService};
use crate::config::Parameters;
use crate::error::Result;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct FakeState {
    pub projects: RefCell<Vec<String>>,
    pub resources: RefCell<Vec<String>>,
    pub languages: Vec<Language>,
    pub stats: Vec<LanguageStat>,
    /// Every remote call, in order
    pub calls: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<String>>,
    pub added_languages: RefCell<Vec<String>>,
}

impl FakeState {
    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

#[derive(Debug, Clone)]
pub struct FakeService(pub Rc<FakeState>);

impl FakeService {
    /// A service knowing `project` with `resources`, four target languages
    /// and statistics for three of them.
    pub fn with_project(project: &str, resources: &[&str]) -> Self {
        let language = |code: &str, name: &str| Language {
            code: code.into(),
            name: name.into(),
        };

        Self(Rc::new(FakeState {
            projects: RefCell::new(vec![project.to_string()]),
            resources: RefCell::new(resources.iter().map(|r| r.to_string()).collect()),
            languages: vec![
                language("fr", "French"),
                language("de", "German"),
                language("it", "Italian"),
                language("ja", "Japanese"),
            ],
            stats: vec![
                LanguageStat::new("de", 10, 9),
                LanguageStat::new("fr", 10, 5),
                LanguageStat::new("it", 0, 0),
            ],
            ..Default::default()
        }))
    }

    pub fn empty() -> Self {
        Self(Rc::new(FakeState::default()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.calls.borrow().clone()
    }
}

impl RemoteService for FakeService {
    type Project = FakeProject;

    async fn project(&self, name: &str) -> Result<Option<FakeProject>> {
        self.0.record(format!("project:{}", name));
        let exists = self.0.projects.borrow().iter().any(|p| p == name);
        Ok(exists.then(|| FakeProject {
            state: self.0.clone(),
            slug: name.to_string(),
        }))
    }

    async fn create_project(
        &self,
        name: &str,
        _source_lang: &str,
        private: bool,
        repository_url: Option<&str>,
    ) -> Result<FakeProject> {
        self.0.record(format!("create_project:{}", name));
        if repository_url.is_none() && !private {
            crate::bail!("A repository url is required for public projects");
        }
        self.0.projects.borrow_mut().push(name.to_string());
        Ok(FakeProject {
            state: self.0.clone(),
            slug: name.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct FakeProject {
    state: Rc<FakeState>,
    slug: String,
}

impl RemoteProject for FakeProject {
    type Resource = FakeResource;

    fn slug(&self) -> &str {
        &self.slug
    }

    async fn resource(&self, slug: &str) -> Result<Option<FakeResource>> {
        self.state.record(format!("resource:{}", slug));
        let exists = self.state.resources.borrow().iter().any(|r| r == slug);
        Ok(exists.then(|| FakeResource {
            state: self.state.clone(),
            slug: slug.to_string(),
        }))
    }

    async fn create_resource(&self, slug: &str) -> Result<FakeResource> {
        self.state.record(format!("create_resource:{}", slug));
        self.state.resources.borrow_mut().push(slug.to_string());
        Ok(FakeResource {
            state: self.state.clone(),
            slug: slug.to_string(),
        })
    }

    async fn languages(&self) -> Result<Vec<Language>> {
        self.state.record("languages");
        Ok(self.state.languages.clone())
    }

    async fn language_stats(&self, resource: &str) -> Result<Vec<LanguageStat>> {
        self.state.record(format!("language_stats:{}", resource));
        Ok(self.state.stats.clone())
    }

    async fn add_languages(&self, codes: &[String]) -> Result<()> {
        self.state.record(format!("add_languages:{}", codes.join(",")));
        self.state
            .added_languages
            .borrow_mut()
            .extend(codes.iter().cloned());
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeResource {
    state: Rc<FakeState>,
    slug: String,
}

impl RemoteResource for FakeResource {
    fn slug(&self) -> &str {
        &self.slug
    }

    async fn upload(&self, content: &str) -> Result<()> {
        self.state.record(format!("upload:{}", self.slug));
        self.state.uploads.borrow_mut().push(content.to_string());
        Ok(())
    }

    async fn download(&self, lang: &str, output_path: &Path) -> Result<()> {
        self.state.record(format!("download:{}", lang));
        tokio::fs::write(output_path, format!("{}:{}", self.slug, lang)).await?;
        Ok(())
    }
}

/// Parameters rooted at `rootdir` with a `demo_plugin` source directory.
pub fn parameters(rootdir: &Path) -> Parameters {
    Parameters {
        rootdir: rootdir.to_path_buf(),
        plugin_source: "demo_plugin".into(),
        organization: "3liz-1".into(),
        project: "demo".into(),
        resource: "demo".into(),
        source_lang: "en".into(),
        lrelease_executable: rootdir.join("bin/lrelease"),
        pylupdate5_executable: rootdir.join("bin/pylupdate5"),
        repository_url: url::Url::parse("https://github.com/3liz/demo").unwrap(),
        selected_languages: Vec::new(),
        minimum_translation: None,
    }
}
