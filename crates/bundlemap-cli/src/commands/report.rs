//! `bundlemap report`: per-target size trees from a bundle manifest.

use crate::formatters::{formatter_for, OutputFormat};
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use bundlemap_core::{ReportBuilder, TargetReport};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the report command.
pub struct ReportRunOptions {
    pub manifest: PathBuf,
    /// `--project-root`; beats every other source.
    pub project_root: Option<PathBuf>,
    /// `report.project_root` from config or environment.
    pub configured_root: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub pretty: bool,
}

/// Picks the project root: `flag`, then the manifest's own `projectRoot`,
/// then `configured`, then the manifest's directory.
pub fn resolve_project_root(
    manifest: &Manifest,
    flag: Option<&Path>,
    configured: Option<&Path>,
) -> PathBuf {
    flag.or(manifest.project_root.as_deref())
        .or(configured)
        .unwrap_or(manifest.base_dir.as_path())
        .to_path_buf()
}

/// Builds the reports for a manifest relative to `project_root`.
///
/// A relative root is resolved against the working directory.
pub fn build_reports(manifest: &Manifest, project_root: &Path) -> Result<Vec<TargetReport>> {
    let builder = ReportBuilder::new(project_root)
        .with_context(|| format!("Invalid project root {}", project_root.display()))?;
    tracing::debug!(project_root = %builder.project_root().display(), "building reports");

    builder
        .build(&manifest.bundles)
        .context("Failed to aggregate bundle assets")
}

/// Writes `<target>.json` treemap payloads into `out_dir`, returning the paths.
pub fn write_reports(reports: &[TargetReport], out_dir: &Path, pretty: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(reports.len());
    for report in reports {
        let path = out_dir.join(format!("{}.json", file_stem(&report.target)));
        let payload = report.chart_data();
        let json = if pretty {
            serde_json::to_string_pretty(&payload)?
        } else {
            serde_json::to_string(&payload)?
        };

        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(target_name = %report.target, path = %path.display(), "wrote report");
        written.push(path);
    }

    Ok(written)
}

/// Target names may contain path separators; keep file names flat.
fn file_stem(target: &str) -> String {
    let stem: String = target
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "report".to_string()
    } else {
        stem
    }
}

/// Runs the report command.
pub fn run_report(options: ReportRunOptions) -> Result<()> {
    let manifest = Manifest::load(&options.manifest)?;
    let root = resolve_project_root(
        &manifest,
        options.project_root.as_deref(),
        options.configured_root.as_deref(),
    );
    let reports = build_reports(&manifest, &root)?;

    match &options.out_dir {
        Some(out_dir) => {
            for path in write_reports(&reports, out_dir, options.pretty)? {
                println!("Wrote {}", path.display());
            }
        }
        None => {
            let output = formatter_for(options.format, options.pretty).format_reports(&reports)?;
            println!("{}", output);
        }
    }

    Ok(())
}
