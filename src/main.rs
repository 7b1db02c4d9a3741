//! Package Security Viewer - Entry Point

use clap::Parser;
use pkgview::model::AppError;
use pkgview::view::{PageRequest, ViewSettings};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Package Security Viewer - security insights for one open-source package version
#[derive(Parser, Debug)]
#[command(name = "pkgview")]
#[command(version)]
#[command(about = "TUI application for viewing open-source package security insights")]
pub struct Args {
    /// Package ecosystem, e.g. npm, pypi, maven
    #[arg(default_value = "npm")]
    pub ecosystem: String,

    /// Package name
    #[arg(default_value = "express")]
    pub name: String,

    /// Package version
    #[arg(id = "pkg_version", value_name = "VERSION", default_value = "4.10.5")]
    pub version: String,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read saved insight responses from this directory instead of the mock
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Print the page to stdout instead of starting the TUI
    #[arg(long)]
    pub plain: bool,

    /// Page width in columns for --plain
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u16).range(40..=400))]
    pub width: u16,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pkgview: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pkgview::config::load_config_with_precedence(args.config.clone())?;
        let merged = pkgview::config::merge_config(config_file);
        let with_env = pkgview::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let no_color_override = if args.no_color { Some(true) } else { None };
        pkgview::config::apply_cli_overrides(with_env, args.data_dir.clone(), no_color_override)
    };

    pkgview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        plain = args.plain,
        "Configuration loaded and resolved"
    );

    let source = pkgview::source::select_source(config.data_dir.clone(), config.mock_latency());
    let request = PageRequest::new(args.ecosystem, args.name, args.version);

    if args.plain {
        // No terminal styling in plain output
        let settings = ViewSettings::from_config(&pkgview::config::ResolvedConfig {
            no_color: true,
            ..config
        });
        let outcome = request.load(source.as_ref());
        let text = pkgview::view::render_plain(&outcome, &settings, args.width);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    pkgview::view::run_page(source.as_ref(), &request, ViewSettings::from_config(&config))?;

    Ok(())
}
