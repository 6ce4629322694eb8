use std::process::Command;
use anyhow::{Context, Result};
use crate::report::{Report, StepOutcome};
use crate::NODE_PACKAGE;

/// Uninstall every globally installed Node.js runtime package. A global
/// `node` or `node@<version>` install shadows the version the build
/// expects. No matches, a missing npm, and uninstall failures are all
/// non-fatal.
pub fn purge_global_node(report: &mut Report) {
    let entries = match list_global_packages() {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Could not list global npm packages: {}", e);
            report.record("list global npm packages", "npm ls -g".to_string(), StepOutcome::Ignored(e.to_string()));
            return;
        }
    };

    let node_entries: Vec<String> = entries.into_iter().filter(|e| is_node_entry(e)).collect();
    if node_entries.is_empty() {
        log::info!("No globally installed Node.js runtime packages found.");
        report.record("uninstall global node packages", NODE_PACKAGE.to_string(), StepOutcome::AlreadyClean);
        return;
    }

    for entry in node_entries {
        let outcome = uninstall_global(&entry);
        report.record("uninstall global package", entry, outcome);
    }
}

/// List globally installed npm packages as `name@version` entries.
fn list_global_packages() -> Result<Vec<String>> {
    let output = Command::new("npm")
        .args(["ls", "-g", "--depth=0"])
        .output()
        .context("failed to execute npm ls")?;

    // npm exits non-zero for extraneous or unmet peers while still printing
    // the tree, so the output is parsed regardless of the exit status
    Ok(parse_package_entries(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the human-readable `npm ls -g --depth=0` tree. The first line is
/// the global prefix path; each entry line holds one `name@version` token
/// after its tree branch characters.
fn parse_package_entries(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            line.split("── ")
                .nth(1)
                .or_else(|| line.split("-- ").nth(1))
        })
        .filter_map(|entry| entry.split_whitespace().next())
        .filter(|entry| !entry.starts_with('('))
        .map(str::to_string)
        .collect()
}

/// Match entries whose package name is exactly the Node.js runtime, either
/// bare (`node`) or with a version suffix (`node@18.17.0`). Packages that
/// merely share the prefix (`nodemon`, `node-gyp`) do not match.
fn is_node_entry(entry: &str) -> bool {
    match entry.strip_prefix(NODE_PACKAGE) {
        Some(rest) => rest.is_empty() || rest.starts_with('@'),
        None => false,
    }
}

/// Uninstall one global package. npm's stdio is inherited so its own
/// progress output reaches the user.
fn uninstall_global(entry: &str) -> StepOutcome {
    log::info!("Uninstalling global package: {}", entry);

    let status = Command::new("npm").args(["uninstall", "-g", entry]).status();
    match status {
        Ok(status) if status.success() => {
            log::info!("Uninstalled global package: {}", entry);
            StepOutcome::Cleared
        }
        Ok(status) => {
            log::warn!("npm uninstall -g {} exited with a non-zero status: {}", entry, status);
            StepOutcome::Ignored(format!("exit status: {}", status))
        }
        Err(e) => {
            log::warn!("Failed to execute npm uninstall for {}: {}", entry, e);
            StepOutcome::Ignored(e.to_string())
        }
    }
}
