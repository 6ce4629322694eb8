use std::{fs, io, path::Path};
use crate::report::{Report, StepOutcome};
use crate::{workspace, GLOBAL_NODE_MODULES};

/// Remove every workspace-local artifact path. The steps are independent:
/// a failed removal is recorded and the sweep moves on to the next target.
pub fn sweep_workspace(root: &Path, report: &mut Report) {
    for dir in workspace::get_artifact_dirs(root) {
        let outcome = remove_dir(&dir);
        report.record("remove directory", dir.display().to_string(), outcome);
    }

    let temp_file = workspace::get_gui_temp_file(root);
    let outcome = remove_file(&temp_file);
    report.record("remove temp file", temp_file.display().to_string(), outcome);
}

/// Remove the global npm dependency tree. Lacking permission on the system
/// path is recorded as an ignored failure and the run continues.
pub fn remove_global_modules(report: &mut Report) {
    let path = Path::new(GLOBAL_NODE_MODULES);
    let outcome = remove_dir(path);
    report.record("remove global dependency tree", path.display().to_string(), outcome);
}

/// Recursive, forced directory removal. A missing target is already clean,
/// not an error.
fn remove_dir(path: &Path) -> StepOutcome {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            log::info!("Removed directory: {}", path.display());
            StepOutcome::Cleared
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Directory does not exist, nothing to remove: {}", path.display());
            StepOutcome::AlreadyClean
        }
        Err(e) => {
            log::warn!("Could not remove directory {}: {}", path.display(), e);
            StepOutcome::Ignored(e.to_string())
        }
    }
}

/// Single-file removal with the same missing-target semantics as `remove_dir`.
fn remove_file(path: &Path) -> StepOutcome {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("Removed file: {}", path.display());
            StepOutcome::Cleared
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("File does not exist, nothing to remove: {}", path.display());
            StepOutcome::AlreadyClean
        }
        Err(e) => {
            log::warn!("Could not remove file {}: {}", path.display(), e);
            StepOutcome::Ignored(e.to_string())
        }
    }
}
