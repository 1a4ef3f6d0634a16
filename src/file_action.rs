//! # File Action Module
//!
//! What happens to the file that just finished playing: it is either kept
//! (moved into a subfolder next to it) or deleted. Exactly one of the two is
//! performed per run, selected by [`RunMode`].
//!
//! ```text
//! /videos/clip.mkv  --move-->   /videos/good/clip.mkv
//! /videos/clip.mkv  --delete--> (gone)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};

/// Which action a run performs on the played file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Keep the file by moving it into the good folder
    Move,
    Delete,
}

impl RunMode {
    /// Exactly one of the two flags has to be set.
    pub fn from_flags(move_flag: bool, delete_flag: bool) -> Result<Self> {
        match (move_flag, delete_flag) {
            (true, false) => Ok(Self::Move),
            (false, true) => Ok(Self::Delete),
            (true, true) => Err(Error::configuration(
                "--move and --delete are mutually exclusive, pick one",
            )),
            (false, false) => Err(Error::configuration(
                "no action given, pass either --move (-m) or --delete (-d)",
            )),
        }
    }
}

/// What a file action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Moved { to: PathBuf },
    Deleted,
}

/// Perform the action selected by `mode` on `path`.
pub fn perform(mode: RunMode, path: &Path, good_folder: &str) -> Result<FileOutcome> {
    match mode {
        RunMode::Move => move_to_subfolder(path, good_folder).map(|to| FileOutcome::Moved { to }),
        RunMode::Delete => delete_file(path).map(|()| FileOutcome::Deleted),
    }
}

/// Move `path` into `<its directory>/<folder>/`, creating the folder first.
///
/// An existing folder is reused. Returns the file's new location.
pub fn move_to_subfolder(path: &Path, folder: &str) -> Result<PathBuf> {
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let filename = path.file_name().ok_or_else(|| {
        Error::file_system(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    debug!("Directory: {}", directory.display());
    debug!("Filename: {}", filename.to_string_lossy());

    let target_dir = directory.join(folder);
    fs::create_dir_all(&target_dir).map_err(|e| Error::file_system(&target_dir, e))?;
    debug!("Good folder ready at {}", target_dir.display());

    let target = target_dir.join(filename);
    fs::rename(path, &target).map_err(|e| Error::file_system(path, e))?;
    info!("Moved to good folder: {}", target.display());

    Ok(target)
}

pub fn delete_file(path: &Path) -> Result<()> {
    info!("Deleting file: {}", path.display());
    fs::remove_file(path).map_err(|e| Error::file_system(path, e))?;
    info!("File deleted: {}", path.display());
    Ok(())
}
