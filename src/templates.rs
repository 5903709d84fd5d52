//! Template table loading.
//!
//! Every fragment file under the templates root becomes one entry in a
//! [`TemplateTable`], keyed by its file name with the extension stripped:
//!
//! ```text
//! src/templates/
//! ├── header.html          → "header"
//! ├── footer.html          → "footer"
//! └── widgets/
//!     └── nav_bar.html     → "nav_bar"
//! ```
//!
//! ## Whitespace Normalization
//!
//! Fragment content is flattened before it is stored: every run of
//! whitespace (spaces, tabs, newlines) becomes a single space and the result
//! is trimmed. A fragment written as
//!
//! ```text
//! <header>
//!   Welcome
//! </header>
//! ```
//!
//! is stored as `<header> Welcome </header>`.
//!
//! "Whitespace" is the HTML-authoring set: ASCII blanks, no-break and
//! typographic spaces, line and paragraph separators, and the byte-order
//! mark, so a fragment saved with a BOM does not carry it into pages.
//! U+0085 (NEL) is not part of the set and is kept as content.
//!
//! ## Name Collisions
//!
//! The directory part of a fragment's path is ignored, so `a/x.html` and
//! `b/x.html` both claim `x`. The fragment visited later in walk order wins.
//! Collisions are not errors; the table keeps a record of them so the
//! `check` command can report them.

use crate::walk::{self, WalkError};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// One or more whitespace characters, BOM included, NEL excluded.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
    )
    .unwrap()
});

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("Cannot read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A fragment that lost its name to a later fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub name: String,
    /// Fragment whose content was discarded.
    pub replaced: PathBuf,
    /// Fragment that now owns the name.
    pub winner: PathBuf,
}

#[derive(Debug, Clone)]
struct Entry {
    content: String,
    source: PathBuf,
}

/// Name → normalized fragment content.
///
/// Built once per run and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    entries: BTreeMap<String, Entry>,
    collisions: Vec<Collision>,
}

impl TemplateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `content` under `name`, replacing any previous entry.
    ///
    /// Returns the replaced content, if any. `content` is stored as given;
    /// [`load_templates`] normalizes before inserting.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Option<String> {
        let name = name.into();
        let entry = Entry {
            content: content.into(),
            source: source.into(),
        };
        let winner = entry.source.clone();
        let previous = self.entries.insert(name.clone(), entry)?;
        self.collisions.push(Collision {
            name,
            replaced: previous.source,
            winner,
        });
        Some(previous.content)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.content.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Path of the fragment that supplied `name`.
    pub fn source_of(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(|e| e.source.as_path())
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every overwrite that happened while the table was built, in order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

/// Collapse each whitespace run to one space and trim both ends.
///
/// Idempotent: normalizing normalized text returns it unchanged.
pub fn normalize_whitespace(text: &str) -> String {
    // After collapsing, any leading or trailing run is exactly one space.
    WHITESPACE_RE
        .replace_all(text, " ")
        .trim_matches(' ')
        .to_string()
}

/// Derive a template name from a fragment path: the file name minus
/// `.{extension}`.
pub fn template_name(path: &Path, extension: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{extension}");
    match file_name.strip_suffix(&suffix) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// Load every fragment under `dir` into a [`TemplateTable`].
///
/// Any unreadable fragment aborts the load.
pub fn load_templates(dir: &Path, extension: &str) -> Result<TemplateTable, TemplateError> {
    let mut table = TemplateTable::new();

    for path in walk::walk(dir, extension)? {
        let raw = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;
        let name = template_name(&path, extension);
        table.insert(name, normalize_whitespace(&raw), path);
    }

    Ok(table)
}
