//! CLI output formatting.
//!
//! Every command prints through a pure `format_*` function that returns lines
//! and a `print_*` wrapper that writes them to stdout. Progress lines are
//! printed as render events arrive.
//!
//! ## Build
//!
//! ```text
//! Processed: index.html
//! Processed: blog/post.html
//!     Unresolved: {{ sidebar }}
//! Rendered 2 pages with 3 templates (4 substitutions, 1 unresolved)
//! Done. Output written to ./public
//! ```
//!
//! ## Check
//!
//! ```text
//! Templates (3)
//!     footer        src/templates/footer.html
//!     header        src/templates/header.html
//!     nav           src/templates/b/nav.html
//!         Overrides: src/templates/a/nav.html
//!
//! Pages (2)
//!     index.html: header, nav
//!     blog/post.html: header
//!         Unresolved: sidebar
//!
//! Unused templates
//!     footer
//! ```

use crate::build::{BuildSummary, CheckReport};
use crate::render::RenderEvent;
use std::path::Path;

/// Render a path with forward slashes for stable output across platforms.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn display_relative(path: &Path, root: &Path) -> String {
    display_path(path.strip_prefix(root).unwrap_or(path))
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single render progress event as display lines.
pub fn format_render_event(event: &RenderEvent) -> Vec<String> {
    match event {
        RenderEvent::PageRendered {
            relative_path,
            unresolved,
        } => {
            let mut lines = vec![format!("Processed: {}", display_path(relative_path))];
            if !unresolved.is_empty() {
                lines.push(format!("    Unresolved: {}", unresolved.join(", ")));
            }
            lines
        }
    }
}

/// Format the closing lines of a build.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let page_word = if summary.pages.len() == 1 { "page" } else { "pages" };
    let template_word = if summary.template_count == 1 {
        "template"
    } else {
        "templates"
    };
    vec![
        format!(
            "Rendered {} {} with {} {} ({} substitutions, {} unresolved)",
            summary.pages.len(),
            page_word,
            summary.template_count,
            template_word,
            summary.substitutions(),
            summary.unresolved()
        ),
        format!("Done. Output written to {}", display_path(&summary.output_dir)),
    ]
}

/// Print build summary to stdout.
pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format a dry-run report: the template table, per-page placeholder usage
/// and templates no page uses.
pub fn format_check_report(report: &CheckReport, project_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let table = &report.table;

    lines.push(format!("Templates ({})", table.len()));
    let width = table.names().map(str::len).max().unwrap_or(0);
    for name in table.names() {
        let source = table
            .source_of(name)
            .map(|s| display_relative(s, project_root))
            .unwrap_or_default();
        lines.push(format!("    {:<width$}  {}", name, source));
        for collision in table.collisions().iter().filter(|c| c.name == name) {
            lines.push(format!(
                "        Overrides: {}",
                display_relative(&collision.replaced, project_root)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Pages ({})", report.pages.len()));
    for page in &report.pages {
        let path = display_path(&page.relative_path);
        if page.resolved.is_empty() {
            lines.push(format!("    {}", path));
        } else {
            lines.push(format!("    {}: {}", path, page.resolved.join(", ")));
        }
        if !page.unresolved.is_empty() {
            lines.push(format!("        Unresolved: {}", page.unresolved.join(", ")));
        }
    }

    let unused = report.unused_templates();
    if !unused.is_empty() {
        lines.push(String::new());
        lines.push("Unused templates".to_string());
        for name in unused {
            lines.push(format!("    {}", name));
        }
    }

    lines
}

/// Print check report to stdout.
pub fn print_check_report(report: &CheckReport, project_root: &Path) {
    for line in format_check_report(report, project_root) {
        println!("{}", line);
    }
}
