// src/render/layout.rs

use serde::{Deserialize, Serialize};

use crate::config::{SurveyConfig, NEUTRAL_RANK};
use crate::summary::QuestionSummary;

/// Fixed geometry of the infographic, in SVG user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f64,
    /// x of the title block and question labels.
    pub left_margin: f64,
    pub card_x: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub card_radius: f64,
    /// Cards start this far above their row's bar.
    pub card_lead: f64,
    pub chart_left: f64,
    pub chart_width: f64,
    /// y of the first row's bar.
    pub top_margin: f64,
    pub row_gap: f64,
    pub bar_height: f64,
    /// Segments at least this wide carry their answer text inside the bar.
    pub inline_label_min: f64,
    /// Space below the last row, footer included.
    pub bottom_padding: f64,
    /// Footer baseline distance from the bottom edge.
    pub footer_offset: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1400.0,
            left_margin: 90.0,
            card_x: 70.0,
            card_width: 1260.0,
            card_height: 92.0,
            card_radius: 16.0,
            card_lead: 44.0,
            chart_left: 520.0,
            chart_width: 780.0,
            top_margin: 170.0,
            row_gap: 140.0,
            bar_height: 46.0,
            inline_label_min: 115.0,
            bottom_padding: 110.0,
            footer_offset: 40.0,
        }
    }
}

impl Layout {
    pub fn height_for(&self, rows: usize) -> f64 {
        self.top_margin + rows as f64 * self.row_gap + self.bottom_padding
    }

    /// y of the bar in row `i`.
    pub fn row_y(&self, i: usize) -> f64 {
        self.top_margin + i as f64 * self.row_gap
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentLabel {
    /// Answer text and share, centered inside the segment.
    Inside { answer: String, percent: f64 },
    /// Share only, just right of the segment.
    Beside { percent: f64 },
}

/// One answer's slice of a stacked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub width: f64,
    pub color: String,
    pub label: SegmentLabel,
}

/// Lay out `summary` as a left-to-right stacked bar starting at `chart_left`.
/// Every answered category gets at least one unit of width.
pub fn bar_segments(
    summary: &QuestionSummary,
    layout: &Layout,
    config: &SurveyConfig,
) -> Vec<Segment> {
    if summary.total == 0 {
        return Vec::new();
    }

    let mut x = layout.chart_left;
    let mut segments = Vec::with_capacity(summary.entries.len());
    for entry in &summary.entries {
        let fraction = entry.count as f64 / summary.total as f64;
        let width = (layout.chart_width * fraction).max(1.0);
        let percent = summary.share(entry.count);
        let color = config
            .tone_color(entry.rank.unwrap_or(NEUTRAL_RANK))
            .to_string();
        let label = if width > layout.inline_label_min {
            SegmentLabel::Inside {
                answer: entry.answer.clone(),
                percent,
            }
        } else {
            SegmentLabel::Beside { percent }
        };
        segments.push(Segment {
            x,
            width,
            color,
            label,
        });
        x += width;
    }
    segments
}
