use anyhow::{Context, Result};
use survey_visual::{summarize_survey, SurveyConfig, SurveyExport};
use tracing_subscriber::{fmt, EnvFilter};

/// Print the per-question answer counts as JSON instead of rendering them.
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = SurveyConfig::from_env()?;
    config.validate().context("invalid survey config")?;

    let export = SurveyExport::from_path(&config.csv_path)?;
    let summary = summarize_survey(&export, &config)?;

    let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    println!("{}", json);
    Ok(())
}
