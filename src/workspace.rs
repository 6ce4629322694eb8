use std::{env, path::{Path, PathBuf}};
use anyhow::{Context, Result};
use crate::{GUI_DIRECTORY, GUI_TEMP_FILE, LOCK_FILE};

/// Get the directory the tool was invoked from. All workspace paths are
/// resolved against this directory; the process working directory itself
/// is never changed.
pub fn get_invocation_dir() -> Result<PathBuf> {
    env::current_dir().context("invocation directory is not accessible")
}

/// Get the GUI checkout directory inside the workspace
pub fn get_gui_dir(root: &Path) -> PathBuf {
    root.join(GUI_DIRECTORY)
}

/// Get the artifact directories to remove, in removal order: both virtual
/// environments, the Python packaging output, and the generated parts of
/// the GUI checkout.
pub fn get_artifact_dirs(root: &Path) -> Vec<PathBuf> {
    let gui_dir = get_gui_dir(root);

    vec![
        root.join("..").join("venv"),
        root.join("venv"),
        root.join("chives_blockchain.egg-info"),
        root.join("build_scripts").join("final_installer"),
        root.join("dist"),
        root.join("build_scripts").join("dist"),
        gui_dir.join("build"),
        gui_dir.join("daemon"),
        gui_dir.join("node_modules"),
    ]
}

/// Get the scratch file the GUI build leaves behind
pub fn get_gui_temp_file(root: &Path) -> PathBuf {
    get_gui_dir(root).join(GUI_TEMP_FILE)
}

/// Get the lock file tracked inside the GUI checkout
pub fn get_lock_file(root: &Path) -> PathBuf {
    get_gui_dir(root).join(LOCK_FILE)
}
