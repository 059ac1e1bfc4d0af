use anyhow::{anyhow, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;

use crate::{config::SurveyConfig, load::SurveyExport, render::render_svg, summary};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub output_path: PathBuf,
    pub completed: usize,
    pub bytes: usize,
}

/// Load → summarize → render → write, per `config`.
pub fn generate(config: &SurveyConfig) -> Result<Report> {
    let start = Instant::now();
    config.validate().context("invalid survey config")?;

    let export = SurveyExport::from_path(&config.csv_path)?;
    let summary = summary::summarize_survey(&export, config)?;
    let svg = render_svg(&summary, config);
    write_atomic(&config.output_path, svg.as_bytes())?;

    info!(
        output = %config.output_path.display(),
        completed = summary.completed,
        bytes = svg.len(),
        elapsed = ?start.elapsed(),
        "rendered infographic"
    );
    Ok(Report {
        output_path: config.output_path.clone(),
        completed: summary.completed,
        bytes: svg.len(),
    })
}

/// Write to a sibling temp file, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("output path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let tmp_path = dir.join(format!(".{}.tmp", file_name));
    fs::write(&tmp_path, contents)
        .with_context(|| format!("writing {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
    Ok(())
}
