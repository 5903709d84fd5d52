//! Page rendering.
//!
//! Walks the pages tree, fills in placeholders and writes each result to the
//! same relative path under the output root:
//!
//! ```text
//! src/pages/                   output/
//! ├── index.html        →      ├── index.html
//! └── blog/                    └── blog/
//!     └── post.html     →          └── post.html
//! ```
//!
//! Missing output directories are created. Existing files are overwritten
//! without warning, and files in the output root that have no page
//! counterpart are left alone.
//!
//! ## Failure
//!
//! The first unreadable page or unwritable destination aborts the run. There
//! is no rollback: pages written before the failure stay on disk.
//!
//! ## Parallel Rendering
//!
//! With `parallel` set, pages are rendered with [rayon](https://docs.rs/rayon)
//! on the global pool. Pages only share the read-only template table, so the
//! written files are identical either way. The returned list is still in walk
//! order; progress events arrive in completion order.

use crate::substitute::{self, Placeholder};
use crate::templates::TemplateTable;
use crate::walk::{self, WalkError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("Cannot read page {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress notification sent while pages are rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    PageRendered {
        /// Path relative to the pages root (and the output root).
        relative_path: PathBuf,
        /// Placeholders left in the output because no template matched.
        unresolved: Vec<String>,
    },
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub relative_path: PathBuf,
    pub destination: PathBuf,
    /// Placeholders replaced with template content.
    pub substitutions: usize,
    /// Placeholders left verbatim, in document order.
    pub unresolved: Vec<Placeholder>,
}

/// Render every page under `pages_dir` into `output_dir`.
pub fn render_pages(
    pages_dir: &Path,
    output_dir: &Path,
    extension: &str,
    table: &TemplateTable,
    parallel: bool,
    events: Option<Sender<RenderEvent>>,
) -> Result<Vec<RenderedPage>, RenderError> {
    let pages = walk::walk(pages_dir, extension)?;

    if parallel {
        pages
            .par_iter()
            .map(|page| -> Result<RenderedPage, RenderError> {
                let rendered = render_page(page, pages_dir, output_dir, table)?;
                notify(events.as_ref(), &rendered);
                Ok(rendered)
            })
            .collect()
    } else {
        let mut rendered_pages = Vec::with_capacity(pages.len());
        for page in &pages {
            let rendered = render_page(page, pages_dir, output_dir, table)?;
            notify(events.as_ref(), &rendered);
            rendered_pages.push(rendered);
        }
        Ok(rendered_pages)
    }
}

/// Render a single page file to its mirrored destination.
pub fn render_page(
    page: &Path,
    pages_dir: &Path,
    output_dir: &Path,
    table: &TemplateTable,
) -> Result<RenderedPage, RenderError> {
    // Walked paths always start with the pages root.
    let relative_path = page.strip_prefix(pages_dir).unwrap_or(page).to_path_buf();
    let destination = output_dir.join(&relative_path);

    let content = fs::read_to_string(page).map_err(|source| RenderError::Read {
        path: page.to_path_buf(),
        source,
    })?;

    let unresolved = substitute::unresolved(&content, table);
    let substitutions = substitute::placeholders(&content).len() - unresolved.len();
    let output = substitute::apply(&content, table);

    write_output(&destination, &output)?;

    Ok(RenderedPage {
        relative_path,
        destination,
        substitutions,
        unresolved,
    })
}

fn write_output(destination: &Path, output: &str) -> Result<(), RenderError> {
    let write_err = |source| RenderError::Write {
        path: destination.to_path_buf(),
        source,
    };
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(destination, output).map_err(write_err)
}

fn notify(events: Option<&Sender<RenderEvent>>, page: &RenderedPage) {
    if let Some(tx) = events {
        // The printer may already be gone; rendering carries on regardless.
        let _ = tx.send(RenderEvent::PageRendered {
            relative_path: page.relative_path.clone(),
            unresolved: page.unresolved.iter().map(|p| p.span.clone()).collect(),
        });
    }
}
