//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. The file is optional; stock
//! defaults reproduce the classic layout where fragments and pages live under
//! `src/` and output lands in the project root:
//!
//! ```text
//! project/
//! ├── site.toml                # Optional
//! ├── src/
//! │   ├── templates/           # Fragments: header.html → {{header}}
//! │   └── pages/               # Pages: mirrored into the output root
//! │       ├── index.html
//! │       └── blog/post.html
//! ├── index.html               # ← output
//! └── blog/post.html           # ← output
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! templates_dir = "src/templates"
//! pages_dir = "src/pages"
//! output_dir = "."
//! extension = "html"
//!
//! [processing]
//! parallel = false          # Render pages on a rayon pool
//! max_processes = 4         # Pool size when parallel (omit for auto = CPU cores)
//! ```
//!
//! Relative directories resolve against the project root (see
//! [`SiteConfig::rooted`]). The three roots are independent; nothing stops
//! them from overlapping, so keep the output root away from the inputs if you
//! rebuild often.
//!
//! Config files are sparse: any key the file leaves out takes its default.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Fragment tree. Each file becomes a `{{name}}` template.
    pub templates_dir: PathBuf,
    /// Page tree. Each file is substituted and mirrored into `output_dir`.
    pub pages_dir: PathBuf,
    /// Where rendered pages are written.
    pub output_dir: PathBuf,
    /// File extension (without the dot) shared by fragments and pages.
    pub extension: String,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("src/templates"),
            pages_dir: PathBuf::from("src/pages"),
            output_dir: PathBuf::from("."),
            extension: "html".to_string(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation(
                "extension must not be empty".into(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "extension must be given without a leading dot (got \"{}\")",
                self.extension
            )));
        }
        if self.extension.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "extension must not contain path separators".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the three directories against `root`.
    ///
    /// Absolute directories are kept as they are.
    pub fn rooted(mut self, root: &Path) -> Self {
        self.templates_dir = root.join(&self.templates_dir);
        self.pages_dir = root.join(&self.pages_dir);
        self.output_dir = root.join(&self.output_dir);
        self
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Render pages concurrently. Off by default: pages are rendered one at a
    /// time in walk order and progress lines come out in that order.
    pub parallel: bool,
    /// Maximum number of rendering threads when `parallel` is on.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `parallel = false` → 1
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    if !config.parallel {
        return 1;
    }
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load config from `site.toml` in the given directory.
///
/// Missing keys take their defaults; a missing file yields
/// [`SiteConfig::default`]. Directories in the result are still relative;
/// call [`SiteConfig::rooted`] to anchor them.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Pages Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative directories are resolved against the project root (--root).
# Unknown keys will cause an error.

# Fragment templates. templates_dir/header.html is inserted wherever a page
# says {{header}} (or {{ header }}). Subdirectories are allowed, but only the
# file name counts: a/x.html and b/x.html both define {{x}}, and the one
# later in sorted order wins.
templates_dir = "src/templates"

# Pages. Every file is copied to the same relative path under output_dir with
# its placeholders filled in.
pages_dir = "src/pages"

# Output root. Existing files at the same paths are overwritten.
output_dir = "."

# Extension (without the dot) of both fragments and pages.
extension = "html"

# ---------------------------------------------------------------------------
# Parallel rendering
# ---------------------------------------------------------------------------
[processing]
# Render pages on a thread pool. Progress lines may then arrive out of order.
parallel = false

# Maximum number of rendering threads when parallel = true.
# Omit to use all CPU cores. Values above the core count are clamped down.
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_classic_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from("src/templates"));
        assert_eq!(config.pages_dir, PathBuf::from("src/pages"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.extension, "html");
        assert!(!config.processing.parallel);
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(r#"output_dir = "public""#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.pages_dir, PathBuf::from("src/pages"));
        assert_eq!(config.extension, "html");
    }

    #[test]
    fn rooted_joins_relative_dirs() {
        let config = SiteConfig::default().rooted(Path::new("/site"));
        assert_eq!(config.templates_dir, PathBuf::from("/site/src/templates"));
        assert_eq!(config.pages_dir, PathBuf::from("/site/src/pages"));
        assert_eq!(config.output_dir, PathBuf::from("/site/."));
    }

    #[cfg(unix)]
    #[test]
    fn rooted_keeps_absolute_dirs() {
        let config = SiteConfig {
            output_dir: PathBuf::from("/var/www"),
            ..SiteConfig::default()
        }
        .rooted(Path::new("/site"));
        assert_eq!(config.output_dir, PathBuf::from("/var/www"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
templates_dir = "partials"
output_dir = "dist"

[processing]
parallel = true
max_processes = 2
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("partials"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert!(config.processing.parallel);
        assert_eq!(config.processing.max_processes, Some(2));
        // Unspecified values should be defaults
        assert_eq!(config.pages_dir, PathBuf::from("src/pages"));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), r#"extension = """#).unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(r#"page_dir = "x""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r#"
[processing]
threads = 4
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "colour = \"red\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_leading_dot_extension() {
        let config = SiteConfig {
            extension: ".html".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_extension_with_separator() {
        let config = SiteConfig {
            extension: "html/x".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_processes() {
        let config = SiteConfig {
            processing: ProcessingConfig {
                parallel: true,
                max_processes: Some(0),
            },
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // effective_threads tests
    // =========================================================================

    #[test]
    fn effective_threads_sequential_by_default() {
        assert_eq!(effective_threads(&ProcessingConfig::default()), 1);
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            parallel: true,
            max_processes: None,
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            parallel: true,
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            parallel: true,
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // Partial config tests
    // =========================================================================

    #[test]
    fn partial_processing_section_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[processing]
parallel = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert!(config.processing.parallel);
        assert_eq!(config.processing.max_processes, None);
        assert_eq!(config.extension, "html");
    }

    #[test]
    fn empty_file_is_default_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), SiteConfig::default());
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
