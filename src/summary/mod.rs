// src/summary/mod.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{Question, SurveyConfig, UNRANKED_ORDER};
use crate::load::SurveyExport;

/// Count of one answer text within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCount {
    pub answer: String,
    pub count: usize,
    /// Position on its scale, `None` when no configured scale lists it.
    pub rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSummary {
    pub column: String,
    pub label: String,
    /// Ordered by rank; unranked answers last, in first-seen order.
    pub entries: Vec<AnswerCount>,
    /// Responses that answered this question. Always the sum of `entries` counts.
    pub total: usize,
}

impl QuestionSummary {
    /// Percentage of `total` that `count` represents; 0 when nobody answered.
    pub fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySummary {
    /// Completed responses in the export.
    pub completed: usize,
    pub questions: Vec<QuestionSummary>,
}

/// Count the answers to `question`, ordered along the answer scales in `ranks`.
pub fn summarize(
    export: &SurveyExport,
    question: &Question,
    ranks: &HashMap<String, usize>,
) -> Result<QuestionSummary> {
    // first-seen order is kept so ties sort deterministically
    let mut entries: Vec<AnswerCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for answer in export.answers(&question.column)? {
        match index.get(answer) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(answer, entries.len());
                entries.push(AnswerCount {
                    answer: answer.to_string(),
                    count: 1,
                    rank: ranks.get(answer).copied(),
                });
            }
        }
    }

    // stable: equal ranks keep first-seen order
    entries.sort_by_key(|e| e.rank.unwrap_or(UNRANKED_ORDER));
    let total = entries.iter().map(|e| e.count).sum();

    debug!(
        column = %question.column,
        total,
        distinct = entries.len(),
        "summarized question"
    );
    Ok(QuestionSummary {
        column: question.column.clone(),
        label: question.label.clone(),
        entries,
        total,
    })
}

/// Summarize every configured question, in configured order.
pub fn summarize_survey(export: &SurveyExport, config: &SurveyConfig) -> Result<SurveySummary> {
    let ranks = config.rank_lookup();
    let questions = config
        .questions
        .iter()
        .map(|q| {
            summarize(export, q, &ranks)
                .with_context(|| format!("summarizing {} ({})", q.column, q.label))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(SurveySummary {
        completed: export.len(),
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    const EXPORT: &str = "StartDate,Finished,ResponseId,Q29,Q6
Start Date,Finished,Response ID,How likely?,Overall perception?
2025-12-01,True,R_1,Very likely,Neutral
2025-12-01,True,R_2,Somewhat likely,Very Positive
2025-12-01,True,R_3,Very likely,
2025-12-01,True,R_4,Maybe,Somewhat Negative
2025-12-01,True,R_5,Very unlikely,
2025-12-01,True,R_6,Perhaps,Neutral
2025-12-01,True,R_7,Maybe,Neutral
2025-12-01,False,R_8,Very likely,Very Negative
";

    fn export() -> SurveyExport {
        SurveyExport::from_reader(EXPORT.as_bytes()).unwrap()
    }

    #[test]
    fn orders_by_scale_then_first_seen() -> Result<()> {
        let ranks = SurveyConfig::default().rank_lookup();
        let q = Question::new("Q29", "Likelihood");
        let s = summarize(&export(), &q, &ranks)?;

        let got: Vec<(&str, usize, Option<usize>)> = s
            .entries
            .iter()
            .map(|e| (e.answer.as_str(), e.count, e.rank))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Very unlikely", 1, Some(0)),
                ("Somewhat likely", 1, Some(3)),
                ("Very likely", 2, Some(4)),
                ("Maybe", 2, None),
                ("Perhaps", 1, None),
            ]
        );
        assert_eq!(s.total, 7);
        Ok(())
    }

    #[test]
    fn counts_sum_to_total_and_blanks_are_excluded() -> Result<()> {
        let summary = summarize_survey(&export(), &{
            let mut cfg = SurveyConfig::default();
            cfg.questions = vec![
                Question::new("Q29", "Likelihood"),
                Question::new("Q6", "Perception"),
            ];
            cfg
        })?;

        assert_eq!(summary.completed, 7);
        for q in &summary.questions {
            let sum: usize = q.entries.iter().map(|e| e.count).sum();
            assert_eq!(sum, q.total, "{}", q.column);
        }
        // R_3 and R_5 left Q6 blank; R_8 is unfinished
        let q6 = &summary.questions[1];
        assert_eq!(q6.total, 5);
        assert_eq!(q6.entries[0].answer, "Somewhat Negative");
        assert_eq!(q6.entries[1].answer, "Neutral");
        assert_eq!(q6.entries[1].count, 3);
        Ok(())
    }

    #[test]
    fn share_handles_empty_question() {
        let s = QuestionSummary {
            column: "Q1".into(),
            label: "Empty".into(),
            entries: Vec::new(),
            total: 0,
        };
        assert_eq!(s.share(0), 0.0);

        let s = QuestionSummary { total: 8, ..s };
        assert_eq!(s.share(2), 25.0);
    }

    #[test]
    fn unknown_question_column_names_it() {
        let cfg = SurveyConfig::default();
        let err = summarize_survey(&export(), &cfg).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Q51"), "{}", msg);
    }
}
