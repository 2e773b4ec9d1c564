//! Per-language progress report for the `list` command.

use crate::client::{LanguageStat, RemoteProject};
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;

/// One line of the language report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageReport {
    pub code: String,
    pub name: String,
    pub strings: u64,
    pub ratio: f64,
}

/// Project languages with their progress on `resource`, best translated
/// first. Languages without statistics report zero strings.
pub async fn language_report<P: RemoteProject>(
    project: &P,
    resource: &str,
) -> Result<Vec<LanguageReport>> {
    let stats: HashMap<String, LanguageStat> = project
        .language_stats(resource)
        .await?
        .into_iter()
        .map(|stat| (stat.code.clone(), stat))
        .collect();

    let mut rows: Vec<LanguageReport> = project
        .languages()
        .await?
        .into_iter()
        .map(|language| {
            let (strings, ratio) = stats
                .get(&language.code)
                .map_or((0, 0.0), |stat| (stat.total_strings, stat.ratio));
            LanguageReport {
                code: language.code,
                name: language.name,
                strings,
                ratio,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    Ok(rows)
}
