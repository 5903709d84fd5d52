use clap::{Parser, Subcommand};
use simple_pages::{build, config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-pages")]
#[command(about = "Static site generator that stitches HTML fragments into pages")]
#[command(long_about = "\
Static site generator that stitches HTML fragments into pages

Every file in the templates directory becomes a fragment named after its file
name. Pages refer to fragments with {{name}} placeholders; the build writes
each page to the same relative path under the output directory with the
fragments pasted in.

Project structure (defaults):

  ./
  ├── site.toml                 # Optional configuration
  ├── src/
  │   ├── templates/
  │   │   ├── header.html       # {{header}}
  │   │   └── parts/footer.html # {{footer}} (directories are ignored)
  │   └── pages/
  │       ├── index.html        # → ./index.html
  │       └── blog/post.html    # → ./blog/post.html

Unknown placeholders are left in the output untouched. Fragments are inserted
as-is and never expanded again.

Run 'simple-pages gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Project root: site.toml is read from here and relative paths resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Templates directory (overrides site.toml)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Pages directory (overrides site.toml)
    #[arg(long, global = true)]
    pages: Option<PathBuf>,

    /// Output directory (overrides site.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render all pages into the output directory (default)
    Build,
    /// Report templates, placeholders and collisions without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let site = load_site_config(&cli)?;
            init_thread_pool(&site.processing);
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_render_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = build::build(&site, Some(tx));
            // The sender is dropped by now, so the printer drains and exits.
            printer.join().ok();
            output::print_build_summary(&result?);
        }
        Command::Check => {
            let site = load_site_config(&cli)?;
            println!("==> Checking {}", site.pages_dir.display());
            let report = build::check(&site)?;
            output::print_check_report(&report, &cli.root);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `site.toml` from the project root, apply CLI overrides and anchor
/// relative paths at the root.
fn load_site_config(cli: &Cli) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site = config::load_config(&cli.root)?;
    if let Some(dir) = &cli.templates {
        site.templates_dir = dir.clone();
    }
    if let Some(dir) = &cli.pages {
        site.pages_dir = dir.clone();
    }
    if let Some(dir) = &cli.output {
        site.output_dir = dir.clone();
    }
    Ok(site.rooted(&cli.root))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
