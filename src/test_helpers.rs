//! Shared test utilities for the simple-pages test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let config = site_config(tmp.path());
//! write_file(&config.templates_dir, "header.html", "<header/>");
//! write_file(&config.pages_dir, "index.html", "{{header}}");
//! ```

use crate::config::SiteConfig;
use std::fs;
use std::path::Path;

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
}

/// Read `root/relative`. Panics with the path if it is missing.
pub fn read_file(root: &Path, relative: &str) -> String {
    let path = root.join(relative);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// A config with all three roots inside `root`, kept apart from each other.
///
/// No directories are created.
pub fn site_config(root: &Path) -> SiteConfig {
    SiteConfig {
        templates_dir: "templates".into(),
        pages_dir: "pages".into(),
        output_dir: "out".into(),
        ..SiteConfig::default()
    }
    .rooted(root)
}
