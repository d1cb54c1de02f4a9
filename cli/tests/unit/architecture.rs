//! Structural tests for layer boundaries.
//!
//! These tests scan source files to verify that domain and application code
//! stay free of runtime clients, protocol crates and terminal output.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

fn src_dir(layer: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer)
}

/// Non-test, non-comment lines of every file in `layer` containing any of `needles`.
fn find_violations(layer: &str, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(&src_dir(layer)) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            if let Some(needle) = needles.iter().find(|n| line.contains(*n)) {
                violations.push(format!("{rel}:{}: `{needle}` in {layer}/: {trimmed}", i + 1));
            }
        }
    }
    violations
}

#[test]
fn domain_depends_on_nothing_outside_domain() {
    let violations = find_violations(
        "domain",
        &[
            "bollard",
            "rmcp",
            "tokio",
            "crate::application",
            "crate::infra",
            "crate::output",
            "crate::commands",
            "crate::mcp",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay pure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_reaches_runtime_only_through_ports() {
    let violations = find_violations(
        "application",
        &[
            "bollard",
            "rmcp",
            "crate::infra",
            "crate::output",
            "crate::commands",
            "crate::mcp",
        ],
    );
    assert!(
        violations.is_empty(),
        "application/ must not depend on adapters:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = find_violations("infra", &["crate::commands", "crate::output", "crate::mcp"]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/, output/ or mcp/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_print_macros_below_the_command_layer() {
    let mut violations = Vec::new();
    for layer in ["domain", "application", "infra", "mcp"] {
        violations.extend(find_violations(layer, &["println!", "eprintln!", "print!("]));
    }
    assert!(
        violations.is_empty(),
        "stdout belongs to the MCP transport and the command layer:\n{}",
        violations.join("\n")
    );
}

#[test]
fn docker_client_is_confined_to_infra() {
    let mut violations = Vec::new();
    for layer in ["commands", "output", "mcp"] {
        violations.extend(find_violations(layer, &["bollard"]));
    }
    assert!(
        violations.is_empty(),
        "only infra/ may talk to bollard:\n{}",
        violations.join("\n")
    );
}
