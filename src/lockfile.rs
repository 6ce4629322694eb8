use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result};
use git2::{build::CheckoutBuilder, Repository};
use crate::report::{Report, StepOutcome};
use crate::{workspace, LOCK_FILE};

/// Discard local modifications to the GUI lock file by checking it out from
/// the last committed revision. The GUI checkout not being a repository, or
/// the repository having no commits yet, leaves the file as-is.
pub fn restore_lock_file(root: &Path, report: &mut Report) {
    let lock_file = workspace::get_lock_file(root);

    let outcome = match checkout_from_head(root) {
        Ok(()) => {
            log::info!("Restored lock file to its last committed revision: {}", lock_file.display());
            StepOutcome::Cleared
        }
        Err(e) => {
            log::warn!("Could not restore lock file {}: {}", lock_file.display(), e);
            StepOutcome::Ignored(e.to_string())
        }
    };

    report.record("restore lock file", lock_file.display().to_string(), outcome);
}

/// Force-checkout HEAD restricted to the lock file's repository-relative
/// path. The repository is discovered from the GUI directory, so the lock
/// file is restored whether the GUI checkout is its own repository or part
/// of an enclosing one.
fn checkout_from_head(root: &Path) -> Result<()> {
    let gui_dir = workspace::get_gui_dir(root)
        .canonicalize()
        .map_err(|e| anyhow!("GUI directory is not accessible: {}", e))?;

    let repo = Repository::discover(&gui_dir)?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| anyhow!("repository has no working directory"))?
        .canonicalize()?;

    let lock_path = match gui_dir.strip_prefix(&workdir) {
        Ok(prefix) => prefix.join(LOCK_FILE),
        Err(_) => PathBuf::from(LOCK_FILE),
    };

    let mut checkout = CheckoutBuilder::new();
    checkout.force().path(lock_path.as_path());
    repo.checkout_head(Some(&mut checkout))?;

    Ok(())
}
