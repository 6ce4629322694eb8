use std::{path::Path, sync::OnceLock};
use uuid::Uuid;

mod lockfile;
mod npm;
pub mod report;
mod sweep;
mod workspace;

/// Directory of the GUI checkout inside the workspace
pub const GUI_DIRECTORY: &str = "chives-blockchain-gui";

/// Dependency-pinning manifest tracked inside the GUI checkout
pub const LOCK_FILE: &str = "package-lock.json";

/// Scratch file the GUI build leaves behind
pub const GUI_TEMP_FILE: &str = "temp.json";

/// Global npm dependency tree (fixed system path)
pub const GLOBAL_NODE_MODULES: &str = "/usr/local/lib/node_modules";

/// Name of the globally installable Node.js runtime package
pub const NODE_PACKAGE: &str = "node";

/// ID for tracking this run (e.g. unique report file names)
pub static UUID: OnceLock<Uuid> = OnceLock::new();

/// Main entry point for the reset routine. Every step is best-effort: a
/// failed step is logged and recorded, the remaining steps still run, and
/// the process always exits 0.
pub fn run() {
    let run_id = *UUID.get_or_init(Uuid::new_v4);
    start_logger(run_id);

    let mut stopwatch = stopwatch::Stopwatch::start_new();
    let mut report = report::Report::new(run_id);

    match workspace::get_invocation_dir() {
        Ok(root) => {
            log::info!("Workspace root: {}", root.display());
            reset_workspace(&root, &mut report);
        }
        Err(e) => {
            log::warn!(
                "Could not determine the invocation directory, skipping workspace cleanup: {}",
                e
            );
        }
    }

    sweep::remove_global_modules(&mut report);
    npm::purge_global_node(&mut report);

    stopwatch.stop();
    report.finish(stopwatch.elapsed());
}

/// Remove every workspace-local artifact under `root` and restore the GUI
/// lock file to its last committed revision.
pub fn reset_workspace(root: &Path, report: &mut report::Report) {
    sweep::sweep_workspace(root, report);
    lockfile::restore_lock_file(root, report);
}

/// Simple startup logs to display information about the run
fn start_logger(run_id: Uuid) {
    simple_logging::log_to_stderr(log::LevelFilter::Info);

    log::info!("====================  <chives-reset>  ====================");
    log::info!("Run id:                   {}", run_id);
    log::info!("GUI directory:            {}", GUI_DIRECTORY);
    log::info!("Global dependency tree:   {}", GLOBAL_NODE_MODULES);
    log::info!("==========================================================");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use uuid::Uuid;
    use crate::report::{Report, StepOutcome};
    use super::*;

    /// Lay out every artifact the reset targets, plus files that must
    /// survive, inside a throwaway workspace.
    fn populate_workspace(root: &std::path::Path) {
        for dir in workspace::get_artifact_dirs(root) {
            fs::create_dir_all(dir.join("nested")).unwrap();
            fs::write(dir.join("nested").join("leftover.txt"), "leftover").unwrap();
        }
        fs::write(workspace::get_gui_temp_file(root), "{}").unwrap();

        // files the reset must leave alone
        fs::create_dir_all(root.join("chives")).unwrap();
        fs::write(root.join("chives").join("__init__.py"), "").unwrap();
        fs::write(root.join(GUI_DIRECTORY).join("package.json"), "{}").unwrap();
    }

    #[test]
    fn reset_workspace_clears_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("chives-blockchain");
        fs::create_dir_all(&root).unwrap();
        populate_workspace(&root);

        let mut report = Report::new(Uuid::new_v4());
        reset_workspace(&root, &mut report);

        for path in workspace::get_artifact_dirs(&root) {
            assert!(!path.exists(), "{} should be gone", path.display());
        }
        assert!(!workspace::get_gui_temp_file(&root).exists());

        // non-artifact files survive
        assert!(root.join("chives").join("__init__.py").exists());
        assert!(root.join(GUI_DIRECTORY).join("package.json").exists());
    }

    #[test]
    fn reset_workspace_succeeds_on_a_fresh_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("chives-blockchain");
        fs::create_dir_all(&root).unwrap();

        let mut report = Report::new(Uuid::new_v4());
        reset_workspace(&root, &mut report);
        reset_workspace(&root, &mut report);

        // nothing existed, so every removal reports an already-clean target
        // and the lock file restore is ignored (no GUI checkout at all)
        assert!(report
            .steps
            .iter()
            .filter(|s| s.step.starts_with("remove"))
            .all(|s| s.outcome == StepOutcome::AlreadyClean));
        assert!(report
            .steps
            .iter()
            .filter(|s| s.step == "restore lock file")
            .all(|s| matches!(s.outcome, StepOutcome::Ignored(_))));
    }

    #[test]
    fn reset_workspace_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("chives-blockchain");
        fs::create_dir_all(&root).unwrap();
        populate_workspace(&root);

        let mut first = Report::new(Uuid::new_v4());
        reset_workspace(&root, &mut first);
        let mut second = Report::new(Uuid::new_v4());
        reset_workspace(&root, &mut second);

        for path in workspace::get_artifact_dirs(&root) {
            assert!(!path.exists());
        }
        assert!(second
            .steps
            .iter()
            .filter(|s| s.step.starts_with("remove"))
            .all(|s| s.outcome == StepOutcome::AlreadyClean));
    }
}
