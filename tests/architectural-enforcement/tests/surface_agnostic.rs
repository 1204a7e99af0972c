//! Integration Test: Surface Agnosticism
//!
//! The engine crate must stay usable from any renderer - TUI, GUI, web,
//! headless. That only holds while it depends on no UI framework: surfaces
//! and frame clocks come in through traits, never through a concrete
//! backend.

use std::fs;
use std::path::{Path, PathBuf};

/// UI frameworks the engine must never depend on.
const FORBIDDEN_DEPENDENCIES: &[&str] = &[
    "ratatui",
    "crossterm",
    "egui",
    "eframe",
    "gtk",
    "web-sys",
    "winit",
];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root exists")
        .to_path_buf()
}

#[test]
fn test_engine_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("core/Cargo.toml"))
        .expect("engine manifest is readable");

    for dep in FORBIDDEN_DEPENDENCIES {
        assert!(
            !manifest.contains(dep),
            "core/Cargo.toml depends on UI framework `{dep}`; surfaces must come in through the Surface trait"
        );
    }
}

#[test]
fn test_engine_sources_import_no_ui_framework() {
    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(workspace_root().join("core/src"))
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if !trimmed.starts_with("use ") && !trimmed.starts_with("pub use ") {
                continue;
            }
            for dep in FORBIDDEN_DEPENDENCIES {
                let crate_name = dep.replace('-', "_");
                if trimmed.contains(&format!("use {crate_name}")) {
                    violations.push(format!("{}:{}", entry.path().display(), idx + 1));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI framework imports found in engine code:\n{}",
        violations.join("\n")
    );
}
