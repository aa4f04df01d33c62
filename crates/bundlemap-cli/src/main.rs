//! bundlemap CLI - bundle size treemaps and package specifier resolution.

use anyhow::Result;
use bundlemap_cli::commands::{self, ConfigCommand, ReportRunOptions, SpecifiersRunOptions};
use bundlemap_cli::formatters::OutputFormat;
use bundlemap_cli::logging::{init_logging, level_from_flags};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bundlemap")]
#[command(about = "Bundle size treemaps and package specifier resolution", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Output JSON format (alias for --output json)
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file path (defaults to the nearest bundlemap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Resolve import specifiers to package identifiers
    ///
    /// Examples:
    ///   bundlemap specifiers @babel/core/lib/index.js lodash/fp
    ///   cat imports.txt | bundlemap specifiers --stdin
    Specifiers {
        /// Specifiers to resolve
        #[arg(value_name = "SPECIFIER")]
        specifiers: Vec<String>,

        /// Also read specifiers from stdin, one per line
        #[arg(long)]
        stdin: bool,
    },

    /// Build per-target size trees from a bundle manifest
    Report {
        /// Path to the bundle manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Root that asset paths are made relative to
        #[arg(long)]
        project_root: Option<PathBuf>,

        /// Write <target>.json treemap payloads here instead of printing
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Manage bundlemap configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let manager = commands::load_config(cli.config.as_deref())?;
    let config = manager.config();

    let level = match level_from_flags(cli.quiet, cli.verbose) {
        Some(level) => level,
        None => manager.log_level()?,
    };
    init_logging(level);

    let format = if cli.json { OutputFormat::Json } else { cli.format };

    match cli.command {
        Command::Specifiers { specifiers, stdin } => {
            commands::run_specifiers(SpecifiersRunOptions {
                specifiers,
                stdin,
                format,
                pretty: config.report.pretty,
            })
        }
        Command::Report {
            manifest,
            project_root,
            out_dir,
            compact,
        } => commands::run_report(ReportRunOptions {
            manifest,
            project_root,
            configured_root: config.report.project_root.clone(),
            out_dir: out_dir.or_else(|| config.report.out_dir.clone()),
            format,
            pretty: config.report.pretty && !compact,
        }),
        Command::Config { command } => commands::handle_config_command(command, &manager),
    }
}
