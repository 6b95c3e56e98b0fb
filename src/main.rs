use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use log::LevelFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from a tree of Markdown files")]
struct Cli {
    /// URL prefix for root-relative links (overrides the config file)
    base_path: Option<String>,

    /// Site config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log each classified block
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(base_path) = cli.base_path {
        config.site.base_path = base_path;
    }
    if let Some(output) = cli.output {
        config.paths.output = output;
    }

    let report = mdsite::site::build_site(&config).context("building site")?;

    println!(
        "Copied {} assets and generated {} pages into {}",
        report.assets_copied,
        report.pages.len(),
        config.paths.output.display()
    );

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("Error: {failure}");
        }
        bail!("{} page(s) failed to build", report.failures.len());
    }

    Ok(())
}
