use anyhow::Result;
use survey_visual::{generate, SurveyConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let config = SurveyConfig::from_env()?;
    info!(
        csv = %config.csv_path.display(),
        output = %config.output_path.display(),
        questions = config.questions.len(),
        "startup"
    );

    // ─── 3) load, summarize, render, write ───────────────────────────
    let report = generate(&config)?;
    println!("Wrote {}", report.output_path.display());
    Ok(())
}
