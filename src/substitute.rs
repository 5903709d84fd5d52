//! Placeholder substitution.
//!
//! A placeholder is a template name between double braces, with optional
//! whitespace inside the braces:
//!
//! ```text
//! {{header}}   {{ header }}   {{	nav_bar
//! }}
//! ```
//!
//! Names are one or more ASCII letters, digits or underscores. Anything else
//! between the braces (dashes, dots, nested braces) is not a placeholder and
//! passes through untouched.
//!
//! [`apply`] makes a single left-to-right pass. Inserted template text is
//! never scanned again, so a fragment that itself contains `{{...}}` is
//! emitted literally. A placeholder with no matching template is left exactly
//! as written.

use crate::templates::TemplateTable;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `{{`, optional whitespace, the name, optional whitespace, `}}`.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

/// One placeholder occurrence in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub name: String,
    /// The full matched text, braces included.
    pub span: String,
}

/// Replace every known placeholder in `content` with its template.
pub fn apply(content: &str, table: &TemplateTable) -> String {
    PLACEHOLDER_RE
        .replace_all(content, |caps: &Captures| match table.get(&caps[1]) {
            Some(template) => template.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// All placeholders in `content`, in document order.
pub fn placeholders(content: &str) -> Vec<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(content)
        .map(|caps| Placeholder {
            name: caps[1].to_string(),
            span: caps[0].to_string(),
        })
        .collect()
}

/// Placeholders in `content` that `table` has no template for.
pub fn unresolved(content: &str, table: &TemplateTable) -> Vec<Placeholder> {
    placeholders(content)
        .into_iter()
        .filter(|p| !table.contains(&p.name))
        .collect()
}
