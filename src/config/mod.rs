//! Project configuration loading and validation.
//!
//! Settings live in a `[tool.qt-transifex]` table of `pyproject.toml`, or in a
//! `[qt-transifex]` table of `qt-transifex.toml` / `.qt-transifex.toml`. The
//! first existing candidate in the project root wins.

mod metadata;

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Candidate configuration files, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["pyproject.toml", "qt-transifex.toml", ".qt-transifex.toml"];

/// Name of the configuration table
pub const CONFIG_SECTION: &str = "qt-transifex";

/// Source language used when none is configured
pub const DEFAULT_SOURCE_LANG: &str = "en";

/// Configuration as written in the file, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub plugin_source: Option<PathBuf>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub resource: Option<String>,
    pub source_lang: Option<String>,
    pub lrelease_executable: Option<PathBuf>,
    pub pylupdate5_executable: Option<PathBuf>,
    pub repository_url: Option<String>,
    pub selected_languages: Option<LanguageList>,
    pub minimum_translation: Option<f64>,
}

/// Language selection, either `"fr,de"` or `["fr", "de"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LanguageList {
    Csv(String),
    List(Vec<String>),
}

impl LanguageList {
    pub fn into_codes(self) -> Vec<String> {
        let items = match self {
            Self::Csv(value) => value.split(',').map(String::from).collect(),
            Self::List(values) => values,
        };
        items
            .into_iter()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect()
    }
}

/// Validated settings for one invocation.
#[derive(Debug, Clone)]
pub struct Parameters {
    /// Project root directory
    pub rootdir: PathBuf,

    /// Plugin source directory, relative to the root
    pub plugin_source: PathBuf,

    /// Organization slug on Transifex
    pub organization: String,

    /// Project slug on Transifex
    pub project: String,

    /// Resource slug; defaults to the project slug
    pub resource: String,

    /// Language code of the source strings
    pub source_lang: String,

    pub lrelease_executable: PathBuf,

    pub pylupdate5_executable: PathBuf,

    /// Source repository url, required to create public projects
    pub repository_url: Url,

    /// Languages to pick from the available ones; empty means all
    pub selected_languages: Vec<String>,

    /// Minimum translation ratio (percent) for a language to be pulled
    pub minimum_translation: Option<f64>,
}

impl Parameters {
    pub fn plugin_path(&self) -> PathBuf {
        self.rootdir.join(&self.plugin_source)
    }

    /// Directory holding the `.ts` and `.qm` files
    pub fn i18n_path(&self) -> PathBuf {
        self.plugin_path().join("i18n")
    }

    /// Source strings file: `<plugin>/i18n/<resource>_<source_lang>.ts`
    pub fn translation_file_path(&self) -> PathBuf {
        self.i18n_path()
            .join(format!("{}_{}.ts", self.resource, self.source_lang))
    }

    /// Qt project file consumed by pylupdate5: `<plugin>/<project>.pro`
    pub fn project_file_path(&self) -> PathBuf {
        self.plugin_path().join(format!("{}.pro", self.project))
    }
}

/// Find the first existing candidate configuration file in `rootdir`.
pub fn find_config_file(rootdir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| rootdir.join(name))
        .find(|path| path.exists())
}

/// Read the raw qt-transifex table from a configuration file.
///
/// A file without the table yields an empty configuration.
pub fn read_config_from_file(path: &Path) -> std::result::Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut document: toml::Table = toml::from_str(&content).map_err(parse_error)?;
    log::debug!("== Read config from {}", path.display());

    let is_pyproject = path.file_stem().is_some_and(|stem| stem == "pyproject");
    let section = if is_pyproject {
        match document.remove("tool") {
            Some(toml::Value::Table(mut tool)) => tool.remove(CONFIG_SECTION),
            _ => None,
        }
    } else {
        document.remove(CONFIG_SECTION)
    };

    match section {
        Some(value) => {
            let config: RawConfig = value.try_into().map_err(parse_error)?;
            Ok(config)
        }
        None => Ok(RawConfig::default()),
    }
}

/// Load and validate parameters from the configuration found in `rootdir`.
pub fn load_parameters(rootdir: &Path) -> Result<Parameters> {
    let path = find_config_file(rootdir).ok_or_else(|| ConfigError::NotFound {
        rootdir: rootdir.to_path_buf(),
    })?;

    let raw = read_config_from_file(&path)?;
    Ok(validate(rootdir, raw)?)
}

/// Turn a raw configuration into validated [`Parameters`].
pub fn validate(rootdir: &Path, raw: RawConfig) -> std::result::Result<Parameters, ConfigError> {
    let plugin_source = raw
        .plugin_source
        .ok_or(ConfigError::MissingField { field: "plugin_source" })?;
    let organization = required(raw.organization, "organization")?;
    let project = required(raw.project, "project")?;

    let resource = raw
        .resource
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| project.clone());

    let source_lang = raw
        .source_lang
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string());

    let plugin_path = rootdir.join(&plugin_source);
    if !plugin_path.is_dir() {
        return Err(ConfigError::InvalidValue {
            field: "plugin_source",
            reason: format!("{} is not a directory", plugin_path.display()),
        });
    }

    let repository_url = match raw.repository_url.filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => metadata::read_repository(&plugin_path.join("metadata.txt"))?,
    };
    let repository_url = parse_repository_url(&repository_url)?;

    let lrelease_executable = resolve_executable(
        rootdir,
        raw.lrelease_executable,
        "lrelease",
        "lrelease_executable",
    )?;
    let pylupdate5_executable = resolve_executable(
        rootdir,
        raw.pylupdate5_executable,
        "pylupdate5",
        "pylupdate5_executable",
    )?;

    if let Some(ratio) = raw.minimum_translation {
        if !(0.0..=100.0).contains(&ratio) {
            return Err(ConfigError::InvalidValue {
                field: "minimum_translation",
                reason: format!("{} is not within [0, 100]", ratio),
            });
        }
    }

    Ok(Parameters {
        rootdir: rootdir.to_path_buf(),
        plugin_source,
        organization,
        project,
        resource,
        source_lang,
        lrelease_executable,
        pylupdate5_executable,
        repository_url,
        selected_languages: raw
            .selected_languages
            .map(LanguageList::into_codes)
            .unwrap_or_default(),
        minimum_translation: raw.minimum_translation,
    })
}

fn required(value: Option<String>, field: &'static str) -> std::result::Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField { field })
}

fn parse_repository_url(value: &str) -> std::result::Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: "repository_url",
        reason: format!("{}: {}", value, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidValue {
            field: "repository_url",
            reason: format!("unsupported scheme '{}' in {}", scheme, value),
        }),
    }
}

/// Resolve an external tool path.
///
/// Bare command names are looked up on `PATH` first; any other path is
/// taken relative to the project root.
fn resolve_executable(
    rootdir: &Path,
    configured: Option<PathBuf>,
    default: &str,
    field: &'static str,
) -> std::result::Result<PathBuf, ConfigError> {
    let candidate = configured.unwrap_or_else(|| PathBuf::from(default));

    let is_bare_name = !candidate.is_absolute() && candidate.components().count() == 1;
    let resolved = if is_bare_name {
        which::which(&candidate).unwrap_or_else(|_| rootdir.join(&candidate))
    } else {
        rootdir.join(&candidate)
    };

    if !resolved.is_file() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} does not exist", resolved.display()),
        });
    }

    log::debug!("Using {} for {}", resolved.display(), field);
    Ok(resolved)
}
