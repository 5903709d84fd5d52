//! Recursive file discovery.
//!
//! Both the templates tree and the pages tree are enumerated the same way:
//! every regular file under a root, at any depth, whose name ends with the
//! configured extension.
//!
//! ## Traversal Order
//!
//! Depth-first pre-order. A subdirectory is walked completely before its next
//! sibling is visited, and siblings are sorted by file name:
//!
//! ```text
//! templates/
//! ├── a/
//! │   └── x.html      # 1st
//! ├── b/
//! │   └── x.html      # 2nd
//! └── footer.html     # 3rd
//! ```
//!
//! The order is part of the contract: the template table resolves name
//! collisions by last-write-wins, so a stable walk makes the winner
//! predictable on every platform.
//!
//! Symlinks are not followed and are skipped along with other special files.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Cannot walk {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Returns true if `path`'s file name ends with `.{extension}`.
///
/// The match is a case-sensitive suffix check on the whole file name, so
/// `index.html` matches `html` but `index.HTML` and `index.htm` do not.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{extension}");
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(&suffix))
        .unwrap_or(false)
}

/// Collect every file under `root` whose name ends with `.{extension}`.
///
/// Fails if `root` does not exist, is not a directory, or any directory
/// below it cannot be listed.
pub fn walk(root: &Path, extension: &str) -> Result<Vec<PathBuf>, WalkError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| WalkError::Io {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(WalkError::NotADirectory(root.to_path_buf()));
            }
            continue;
        }

        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
