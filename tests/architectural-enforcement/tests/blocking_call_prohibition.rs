//! Integration Test: Blocking Call Prohibition
//!
//! The engine is cooperative and frame-clock-driven: every wait must be a
//! tokio yield point (`tokio::time::sleep`, a frame wait, a Notify). A
//! blocking `std::thread::sleep` anywhere in the engine would stall the
//! whole drive loop and every other task on the worker.
//!
//! This test also enforces the error-propagation rule: production code
//! propagates with `?`, it does not `unwrap()`/`expect()`. Test modules are
//! exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// Root of the engine's production sources.
fn core_src() -> PathBuf {
    workspace_root().join("core/src")
}

fn workspace_root() -> PathBuf {
    // tests/architectural-enforcement -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root exists")
        .to_path_buf()
}

#[test]
fn test_no_blocking_sleep_in_engine_code() {
    let violations = scan(&core_src(), |line| {
        line.contains("std::thread::sleep") || line.contains("thread::sleep(")
    });

    assert!(
        violations.is_empty(),
        "\nBlocking sleep calls found in engine code:\n{}\nUse tokio::time::sleep or the frame clock instead.",
        violations.join("\n")
    );
}

#[test]
fn test_no_unwrap_in_engine_code() {
    let violations = scan(&core_src(), |line| {
        line.contains(".unwrap()") || line.contains(".expect(")
    });

    assert!(
        violations.is_empty(),
        "\nunwrap()/expect() found outside test code:\n{}\nPropagate errors with `?` instead.",
        violations.join("\n")
    );
}

/// Scan production lines of every source file under `dir`.
///
/// Everything from a `#[cfg(test)]` marker to the end of the file is test
/// code by this crate's convention (test modules sit at the bottom), and
/// comment-only content is ignored.
fn scan(dir: &Path, is_violation: impl Fn(&str) -> bool) -> Vec<String> {
    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }

            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }
            let code_part = line.split("//").next().unwrap_or(line);

            if is_violation(code_part) {
                violations.push(format!(
                    "{}:{} - {}",
                    entry.path().display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_flags_blocking_sleep() {
        let dir = std::env::temp_dir().join("arch-enforcement-detector");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("sample.rs"),
            "fn bad() {\n    std::thread::sleep(d);\n}\n",
        )
        .unwrap();

        let violations = scan(&dir, |line| line.contains("std::thread::sleep"));
        assert_eq!(violations.len(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
