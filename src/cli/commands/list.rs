//! `list`: show project languages with their translation progress.

use crate::cli::RuntimeConfig;
use crate::cli::args::ListArgs;
use crate::client::{Client, RemoteService};
use crate::config::load_parameters;
use crate::error::{Result, TranslationError};
use crate::translation::{LanguageReport, language_report};
use serde::Serialize;

pub async fn run(args: &ListArgs, config: &RuntimeConfig) -> Result<()> {
    let parameters = load_parameters(config.rootdir())?;

    let client = Client::connect(&parameters.organization, &args.token.transifex_token).await?;
    let project = client.project(&parameters.project).await?.ok_or_else(|| {
        TranslationError::new(format!("Project {} not found", parameters.project))
    })?;

    let rows = language_report(&project, &parameters.resource).await?;

    let output = config.output();
    if args.json {
        output.println(&render_json(&rows)?)?;
    } else {
        for line in render_table(&rows) {
            output.println(&line)?;
        }
    }

    Ok(())
}

/// JSON array indented with four spaces
fn render_json(rows: &[LanguageReport]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    rows.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn render_table(rows: &[LanguageReport]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "{:>3}. {:<10} {:<25} {:<8} {:.2}",
                i + 1,
                row.code,
                row.name,
                row.strings,
                row.ratio
            )
        })
        .collect()
}
