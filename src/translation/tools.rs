//! External Qt tool invocation: `pylupdate5` extracts source strings into the
//! `.ts` file, `lrelease` compiles `.ts` files into `.qm` files.

use crate::config::Parameters;
use crate::error::{Result, TranslationError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Captured output of a successful tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Regenerate the source strings file from the plugin sources.
///
/// Writes `<plugin>/<project>.pro` listing every `.py` and `.ui` file under
/// the plugin directory, then runs `pylupdate5` on it. Returns the path of
/// the source `.ts` file.
pub async fn update_strings(parameters: &Parameters) -> Result<PathBuf> {
    let plugin_path = parameters.plugin_path();
    let sources_py = collect_sources(&plugin_path, "py");
    let sources_ui = collect_sources(&plugin_path, "ui");

    let ts_path = parameters.translation_file_path();
    tokio::fs::create_dir_all(parameters.i18n_path()).await?;

    let project_file = parameters.project_file_path();
    tokio::fs::write(
        &project_file,
        project_definition(&sources_py, &sources_ui, &ts_path),
    )
    .await?;
    log::debug!(
        "Wrote {} ({} sources, {} forms)",
        project_file.display(),
        sources_py.len(),
        sources_ui.len()
    );

    let output = run_tool(
        "pylupdate5",
        &parameters.pylupdate5_executable,
        &[
            OsStr::new("-noobsolete"),
            OsStr::new("-verbose"),
            project_file.as_os_str(),
        ],
    )
    .await?;
    log::info!("{}\n{}", output.stdout, output.stderr);

    if !ts_path.exists() {
        crate::bail!("Could not create {}", ts_path.display());
    }

    log::info!("Created translation file: {}", ts_path.display());
    Ok(ts_path)
}

/// Compile every `.ts` file of the i18n directory with `lrelease`.
///
/// Returns the `.qm` paths `lrelease` produces, one per input.
pub async fn compile_strings(parameters: &Parameters) -> Result<Vec<PathBuf>> {
    let i18n_path = parameters.i18n_path();
    let ts_files = collect_ts_files(&i18n_path)?;
    if ts_files.is_empty() {
        crate::bail!("No TS files found in {}", i18n_path.display());
    }

    let output = run_tool("lrelease", &parameters.lrelease_executable, &ts_files).await?;
    log::info!("{}", output.stdout);

    Ok(ts_files
        .iter()
        .map(|path| path.with_extension("qm"))
        .collect())
}

/// Content of the Qt project file consumed by pylupdate5
fn project_definition(sources_py: &[PathBuf], sources_ui: &[PathBuf], ts_path: &Path) -> String {
    let join = |paths: &[PathBuf]| {
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    format!(
        "CODECFORTR = UTF-8\nSOURCES = {}\nFORMS = {}\nTRANSLATIONS = {}\n",
        join(sources_py),
        join(sources_ui),
        ts_path.display()
    )
}

/// Files with `extension` anywhere under `root`, in path order
fn collect_sources(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
    files.sort();
    files
}

fn collect_ts_files(i18n_path: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.ts",
        glob::Pattern::escape(&i18n_path.to_string_lossy())
    );

    let entries = glob::glob(&pattern).map_err(|e| {
        TranslationError::new(format!("Invalid search pattern {}: {}", pattern, e))
    })?;

    Ok(entries.filter_map(|entry| entry.ok()).collect())
}

/// Run an external tool, failing with its exit code and output.
async fn run_tool<S: AsRef<OsStr>>(name: &str, executable: &Path, args: &[S]) -> Result<ToolOutput> {
    log::debug!(
        "Running command {} {}",
        executable.display(),
        args.iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = tokio::process::Command::new(executable)
        .args(args)
        .output()
        .await
        .map_err(|e| {
            TranslationError::new(format!(
                "Failed to run {} ({}): {}",
                name,
                executable.display(),
                e
            ))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map_or_else(|| "none".to_string(), |c| c.to_string());
        crate::bail!(
            "{} command failed with return code {}\n{}{}",
            name,
            code,
            stdout,
            stderr
        );
    }

    Ok(ToolOutput { stdout, stderr })
}
