// src/config/mod.rs
pub mod types;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::render::Layout;
pub use types::{Question, NEUTRAL_RANK, UNRANKED_ORDER};

pub const ENV_CONFIG: &str = "SURVEY_CONFIG";
pub const ENV_CSV: &str = "SURVEY_CSV";
pub const ENV_OUTPUT: &str = "SURVEY_OUTPUT";

/// Everything the generator needs besides the CSV content itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub csv_path: PathBuf,
    pub output_path: PathBuf,
    pub title: String,
    pub subtitle: String,
    pub source_note: String,
    pub questions: Vec<Question>,
    /// Answer scales, each ordered from most negative to most positive.
    pub scales: Vec<Vec<String>>,
    /// One color per rank; index 0 is the most negative tone.
    pub palette: Vec<String>,
    pub fallback_color: String,
    pub layout: Layout,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        let scale = |items: [&str; 5]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            csv_path: PathBuf::from("Alternative CPA Pathways Survey_December 31, 2025_09.45.csv"),
            output_path: PathBuf::from("visuals/cpa_survey_key_findings.svg"),
            title: "CPA Pathway Survey: Key Findings".into(),
            subtitle: "Distribution of responses across five high-impact decision questions"
                .into(),
            source_note:
                "Source: Alternative CPA Pathways Survey (cleaned to completed responses only)."
                    .into(),
            questions: vec![
                Question::new("Q29", "Likelihood of pursuing CPA license"),
                Question::new("Q51", "Alternative pathway's impact on CPA desire"),
                Question::new("Q52", "Alternative pathway's impact on graduate degree desire"),
                Question::new("Q6", "Overall perception of CPA pathway change"),
                Question::new("Q25", "Attractiveness of shorter graduate certificate"),
            ],
            scales: vec![
                scale([
                    "Very unlikely",
                    "Somewhat unlikely",
                    "Neither likely nor unlikely",
                    "Somewhat likely",
                    "Very likely",
                ]),
                scale([
                    "Significantly decreased desire",
                    "Decreased desire",
                    "No change in desire",
                    "Increased desire",
                    "Significantly increased desire",
                ]),
                scale([
                    "Very Negative",
                    "Somewhat Negative",
                    "Neutral",
                    "Somewhat Positive",
                    "Very Positive",
                ]),
                scale([
                    "Not at all attractive",
                    "Somewhat unattractive",
                    "Neither attractive nor unattractive",
                    "Somewhat attractive",
                    "Very attractive",
                ]),
            ],
            palette: vec![
                "#8b1e3f".into(), // deep negative
                "#d8576b".into(), // negative
                "#b0b7c3".into(), // neutral
                "#58a4b0".into(), // positive
                "#1d7a8c".into(), // deep positive
            ],
            fallback_color: "#6b778d".into(),
            layout: Layout::default(),
        }
    }
}

impl SurveyConfig {
    /// Load a YAML config from `path`; fields it omits keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg: SurveyConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        debug!(path = %path.display(), questions = cfg.questions.len(), "loaded config");
        Ok(cfg)
    }

    /// Defaults, then `SURVEY_CONFIG` if set, then the `SURVEY_CSV` /
    /// `SURVEY_OUTPUT` path overrides.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match env::var(ENV_CONFIG) {
            Ok(p) if !p.trim().is_empty() => {
                info!("config → {}", p);
                Self::from_file(p.trim())?
            }
            _ => Self::default(),
        };
        if let Ok(p) = env::var(ENV_CSV) {
            if !p.trim().is_empty() {
                cfg.csv_path = PathBuf::from(p.trim());
            }
        }
        if let Ok(p) = env::var(ENV_OUTPUT) {
            if !p.trim().is_empty() {
                cfg.output_path = PathBuf::from(p.trim());
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            bail!("config lists no questions to chart");
        }
        let mut seen = HashSet::new();
        for q in &self.questions {
            if q.column.trim().is_empty() {
                bail!("question {:?} has an empty column name", q.label);
            }
            if !seen.insert(q.column.as_str()) {
                bail!("question column {} is listed more than once", q.column);
            }
        }
        if self.palette.is_empty() {
            bail!("config palette is empty");
        }
        Ok(())
    }

    /// Answer text → rank, merged across every scale. A later scale wins
    /// when two scales list the same text.
    pub fn rank_lookup(&self) -> HashMap<String, usize> {
        let mut ranks = HashMap::new();
        for scale in &self.scales {
            for (rank, answer) in scale.iter().enumerate() {
                ranks.insert(answer.clone(), rank);
            }
        }
        ranks
    }

    pub fn tone_color(&self, rank: usize) -> &str {
        self.palette
            .get(rank)
            .map(String::as_str)
            .unwrap_or(&self.fallback_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let cfg = SurveyConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.questions.len(), 5);
        assert_eq!(cfg.questions[0].column, "Q29");
        assert_eq!(cfg.layout.height_for(cfg.questions.len()), 980.0);
    }

    #[test]
    fn rank_lookup_merges_scales() {
        let ranks = SurveyConfig::default().rank_lookup();
        assert_eq!(ranks.len(), 20);
        assert_eq!(ranks["Very unlikely"], 0);
        assert_eq!(ranks["No change in desire"], 2);
        assert_eq!(ranks["Very Positive"], 4);
        assert_eq!(ranks["Somewhat attractive"], 3);
        assert!(!ranks.contains_key("very positive"));
    }

    #[test]
    fn tone_color_falls_back_out_of_range() {
        let cfg = SurveyConfig::default();
        assert_eq!(cfg.tone_color(0), "#8b1e3f");
        assert_eq!(cfg.tone_color(NEUTRAL_RANK), "#b0b7c3");
        assert_eq!(cfg.tone_color(7), "#6b778d");
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let mut cfg = SurveyConfig::default();
        cfg.questions.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = SurveyConfig::default();
        cfg.questions.push(Question::new("Q29", "again"));
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("Q29"), "{}", err);

        let mut cfg = SurveyConfig::default();
        cfg.palette.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn yaml_overrides_keep_other_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r##"
title: "Course Feedback"
csv_path: "feedback.csv"
questions:
  - column: Q1
    label: "Overall rating"
palette: ["#000000", "#ffffff"]
layout:
  bar_height: 30
"##
        )?;

        let cfg = SurveyConfig::from_file(tmp.path())?;
        assert_eq!(cfg.title, "Course Feedback");
        assert_eq!(cfg.csv_path, PathBuf::from("feedback.csv"));
        assert_eq!(cfg.questions, vec![Question::new("Q1", "Overall rating")]);
        assert_eq!(cfg.palette.len(), 2);
        assert_eq!(cfg.layout.bar_height, 30.0);
        assert_eq!(cfg.layout.width, Layout::default().width);
        assert_eq!(cfg.output_path, SurveyConfig::default().output_path);
        assert_eq!(cfg.scales.len(), 4);
        Ok(())
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let err = SurveyConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.yaml"));
    }
}
