//! Full build: load templates, then render pages.
//!
//! The template table is complete before the first page is read, and pages
//! never see a partially loaded table. A template failure therefore means no
//! page is written at all, while a page failure leaves earlier pages on disk.

use crate::config::SiteConfig;
use crate::render::{self, RenderError, RenderEvent, RenderedPage};
use crate::substitute;
use crate::templates::{self, TemplateError, TemplateTable};
use crate::walk::{self, WalkError};
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Template error: {0}")]
    Templates(#[from] TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Scan error: {0}")]
    Walk(#[from] WalkError),
    #[error("Cannot read page {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    pub template_count: usize,
    pub pages: Vec<RenderedPage>,
}

impl BuildSummary {
    pub fn substitutions(&self) -> usize {
        self.pages.iter().map(|p| p.substitutions).sum()
    }

    pub fn unresolved(&self) -> usize {
        self.pages.iter().map(|p| p.unresolved.len()).sum()
    }
}

/// Run the whole pipeline for an already-rooted config.
pub fn build(
    config: &SiteConfig,
    events: Option<Sender<RenderEvent>>,
) -> Result<BuildSummary, BuildError> {
    let table = templates::load_templates(&config.templates_dir, &config.extension)?;
    let pages = render::render_pages(
        &config.pages_dir,
        &config.output_dir,
        &config.extension,
        &table,
        config.processing.parallel,
        events,
    )?;

    Ok(BuildSummary {
        output_dir: config.output_dir.clone(),
        template_count: table.len(),
        pages,
    })
}

/// Placeholder usage of one page, without writing anything.
#[derive(Debug)]
pub struct PageCheck {
    pub relative_path: PathBuf,
    pub resolved: Vec<String>,
    pub unresolved: Vec<String>,
}

/// Result of a dry run.
#[derive(Debug)]
pub struct CheckReport {
    pub table: TemplateTable,
    pub pages: Vec<PageCheck>,
}

impl CheckReport {
    /// Templates no page refers to.
    pub fn unused_templates(&self) -> Vec<&str> {
        self.table
            .names()
            .filter(|name| {
                !self
                    .pages
                    .iter()
                    .any(|p| p.resolved.iter().any(|r| r == name))
            })
            .collect()
    }
}

/// Load templates and scan pages for placeholders without writing output.
pub fn check(config: &SiteConfig) -> Result<CheckReport, BuildError> {
    let table = templates::load_templates(&config.templates_dir, &config.extension)?;

    let mut pages = Vec::new();
    for path in walk::walk(&config.pages_dir, &config.extension)? {
        let content = fs::read_to_string(&path).map_err(|source| BuildError::Read {
            path: path.clone(),
            source,
        })?;
        let mut names: Vec<String> = Vec::new();
        for placeholder in substitute::placeholders(&content) {
            if !names.contains(&placeholder.name) {
                names.push(placeholder.name);
            }
        }
        let (resolved, unresolved): (Vec<_>, Vec<_>) =
            names.into_iter().partition(|name| table.contains(name));
        pages.push(PageCheck {
            relative_path: path
                .strip_prefix(&config.pages_dir)
                .unwrap_or(&path)
                .to_path_buf(),
            resolved,
            unresolved,
        });
    }

    Ok(CheckReport { table, pages })
}
