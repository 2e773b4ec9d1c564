//! JSON:API documents exchanged with Transifex, and the few domain values
//! the workflow extracts from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level JSON:API document
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub links: Links,
}

/// Pagination links of a collection document
#[derive(Debug, Default, Deserialize)]
pub struct Links {
    pub next: Option<String>,
}

/// A JSON:API resource object.
///
/// Attributes are kept as raw JSON: the workflow reads a handful of fields
/// and never writes objects back.
#[derive(Debug, Clone, Deserialize)]
pub struct Object {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Object {
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    pub fn attr_u64(&self, name: &str) -> Option<u64> {
        self.attributes.get(name).and_then(Value::as_u64)
    }
}

/// Reference to a remote object inside a relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
}

impl Identifier {
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Relationship payload pointing at this object
    pub fn to_relationship(&self) -> Value {
        serde_json::json!({ "data": self })
    }
}

/// Error document returned on failed requests
#[derive(Debug, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorObject {
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ErrorDocument {
    /// Human-readable summary of all reported errors
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()).or(e.code.as_deref()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A language as known by Transifex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn from_object(object: &Object) -> Option<Self> {
        let code = object
            .attr_str("code")
            .map(String::from)
            .or_else(|| object.id.strip_prefix("l:").map(String::from))?;
        let name = object.attr_str("name").unwrap_or(&code).to_string();
        Some(Self { code, name })
    }
}

/// Translation progress of one language for a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageStat {
    pub code: String,
    pub total_strings: u64,
    /// Translated percentage in [0, 100]
    pub ratio: f64,
}

impl LanguageStat {
    pub fn new(code: impl Into<String>, total_strings: u64, translated_strings: u64) -> Self {
        Self {
            code: code.into(),
            total_strings,
            ratio: translation_ratio(translated_strings, total_strings),
        }
    }

    /// Build from a `resource_language_stats` object whose id reads
    /// `o:<org>:p:<project>:r:<resource>:l:<code>`.
    pub fn from_object(object: &Object) -> Option<Self> {
        let (_, code) = object.id.split_once(":l:")?;
        let total = object.attr_u64("total_strings").unwrap_or(0);
        let translated = object.attr_u64("translated_strings").unwrap_or(0);
        Some(Self::new(code, total, translated))
    }
}

/// Percentage of translated strings; zero for an empty resource.
pub fn translation_ratio(translated: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * (translated as f64 / total as f64)
}
