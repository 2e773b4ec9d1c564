//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod mock_api;

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Fake pylupdate5: writes the TRANSLATIONS file named in the .pro file
pub const FAKE_PYLUPDATE5: &str = r#"#!/bin/sh
for last; do :; done
ts=$(sed -n 's/^TRANSLATIONS = //p' "$last")
printf '<?xml version="1.0" encoding="utf-8"?>\n<!DOCTYPE TS>\n<TS version="2.1" language="en"/>\n' > "$ts"
echo "Updating '$ts'..."
"#;

/// Fake lrelease: one .qm per .ts argument
pub const FAKE_LRELEASE: &str = r#"#!/bin/sh
for ts in "$@"; do
    cp "$ts" "${ts%.ts}.qm"
    echo "Generated ${ts%.ts}.qm"
done
"#;

/// Tool that always fails with output on both streams
pub const FAILING_TOOL: &str = r#"#!/bin/sh
echo "partial output"
echo "boom" >&2
exit 3
"#;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copy the fixture project into a fresh temporary directory.
pub fn copy_fixtures() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    let source = fixtures_dir();

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("walk fixtures");
        let relative = entry.path().strip_prefix(&source).expect("fixture prefix");
        let target = dir.path().join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).expect("create fixture dir");
        } else {
            std::fs::copy(entry.path(), &target).expect("copy fixture file");
        }
    }

    dir
}

/// Replace `bin/<name>` under `root` with an executable shell script.
#[cfg(unix)]
pub fn install_tool(root: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = root.join("bin").join(name);
    std::fs::write(&path, script).expect("write tool script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("make tool executable");
}
