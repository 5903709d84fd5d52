//! # Simple Pages
//!
//! A minimal static site generator. HTML pages reference shared fragments by
//! name, and the build writes each page back out with the fragments pasted in:
//!
//! ```text
//! src/templates/header.html    <header>            src/pages/index.html
//!                                Welcome           <body>{{header}}</body>
//!                              </header>
//!
//!                    index.html  →  <body><header> Welcome </header></body>
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Load     templates/  →  TemplateTable   (name → whitespace-normalized HTML)
//! 2. Render   pages/      →  output/         (one pass of {{name}} substitution)
//! ```
//!
//! The table is complete before the first page is read and never changes
//! afterwards, so pages are independent of one another and can be rendered
//! in any order, or in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walk`] | Sorted, depth-first discovery of files with the configured extension |
//! | [`templates`] | Fragment loading, whitespace normalization, the [`templates::TemplateTable`] |
//! | [`substitute`] | `{{name}}` matching and single-pass replacement |
//! | [`render`] | Writes each substituted page to its mirrored output path |
//! | [`build`] | Runs load then render; also the dry-run `check` |
//! | [`config`] | `site.toml` loading, defaults and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Level of Substitution
//!
//! A fragment's text is inserted as-is. If a fragment contains `{{other}}`,
//! that text lands in the page literally; fragments cannot include each
//! other. Unknown placeholders are left in the page unchanged rather than
//! failing the build, and `check` lists them.
//!
//! ## Flat Template Names
//!
//! Only the file name identifies a fragment. Subdirectories are for the
//! author's convenience; `a/card.html` and `b/card.html` both define
//! `{{card}}` and the later one in sorted walk order wins.
//!
//! ## Deterministic Walks
//!
//! Directory entries are sorted by name at every level, so collision
//! resolution and progress output are the same on every filesystem.
//!
//! # Example
//!
//! ```rust,no_run
//! use simple_pages::{build, config};
//! use std::path::Path;
//!
//! let root = Path::new("my-site");
//! let config = config::load_config(root)?.rooted(root);
//! let summary = build::build(&config, None)?;
//! println!("{} pages", summary.pages.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod build;
pub mod config;
pub mod output;
pub mod render;
pub mod substitute;
pub mod templates;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
