// src/render/svg.rs

use std::borrow::Cow;

use super::layout::{bar_segments, SegmentLabel};
use crate::config::SurveyConfig;
use crate::summary::SurveySummary;

const FONT: &str = "Segoe UI, Arial, sans-serif";

/// Escape character data inside an element. Quotes are left as written.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape_with(text, false)
}

/// Escape a value placed inside a double- or single-quoted attribute.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    escape_with(text, true)
}

fn escape_with(text: &str, quotes: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (quotes && matches!(c, '"' | '\''));
    if !text.contains(needs) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Render the whole infographic. Output depends only on the arguments.
pub fn render_svg(summary: &SurveySummary, config: &SurveyConfig) -> String {
    let l = &config.layout;
    let width = l.width;
    let height = l.height_for(summary.questions.len());

    let mut parts = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        ),
        "<defs>".to_string(),
        r#"  <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">"#.to_string(),
        r##"    <stop offset="0%" stop-color="#f7f9fc"/>"##.to_string(),
        r##"    <stop offset="100%" stop-color="#edf1f8"/>"##.to_string(),
        "  </linearGradient>".to_string(),
        r#"  <filter id="cardShadow" x="-10%" y="-10%" width="130%" height="130%">"#.to_string(),
        r##"    <feDropShadow dx="0" dy="4" stdDeviation="6" flood-color="#8fa2c0" flood-opacity="0.2"/>"##
            .to_string(),
        "  </filter>".to_string(),
        "</defs>".to_string(),
        format!(r#"<rect x="0" y="0" width="{width}" height="{height}" fill="url(#bg)"/>"#),
        format!(
            r##"<text x="{}" y="72" font-size="44" font-family="{FONT}" font-weight="700" fill="#1d2d44">{}</text>"##,
            l.left_margin,
            escape_text(&config.title)
        ),
        format!(
            r##"<text x="{}" y="110" font-size="22" font-family="{FONT}" fill="#334e68">{}</text>"##,
            l.left_margin,
            escape_text(&config.subtitle)
        ),
        format!(
            r##"<text x="{}" y="140" font-size="18" font-family="{FONT}" fill="#486581">n = {} completed responses</text>"##,
            l.left_margin, summary.completed
        ),
    ];

    for (i, question) in summary.questions.iter().enumerate() {
        let y = l.row_y(i);
        parts.push(format!(
            r##"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="#ffffff" filter="url(#cardShadow)"/>"##,
            l.card_x,
            y - l.card_lead,
            l.card_width,
            l.card_height,
            l.card_radius
        ));
        parts.push(format!(
            r##"<text x="{}" y="{}" font-size="22" font-family="{FONT}" font-weight="600" fill="#102a43">{}</text>"##,
            l.left_margin,
            y - 8.0,
            escape_text(&question.label)
        ));

        for seg in bar_segments(question, l, config) {
            parts.push(format!(
                r#"<rect x="{:.1}" y="{}" width="{:.1}" height="{}" fill="{}"/>"#,
                seg.x,
                y,
                seg.width,
                l.bar_height,
                escape_attr(&seg.color)
            ));
            let center = seg.x + seg.width / 2.0;
            match seg.label {
                SegmentLabel::Inside { answer, percent } => {
                    parts.push(format!(
                        r##"<text x="{:.1}" y="{}" text-anchor="middle" font-size="13" font-family="{FONT}" fill="#ffffff" font-weight="600">{}</text>"##,
                        center,
                        y + 21.0,
                        escape_text(&answer)
                    ));
                    parts.push(format!(
                        r##"<text x="{:.1}" y="{}" text-anchor="middle" font-size="15" font-family="{FONT}" fill="#ffffff" font-weight="700">{:.1}%</text>"##,
                        center,
                        y + 39.0,
                        percent
                    ));
                }
                SegmentLabel::Beside { percent } => {
                    parts.push(format!(
                        r##"<text x="{:.1}" y="{}" font-size="13" font-family="{FONT}" fill="#334e68">{:.1}%</text>"##,
                        seg.x + seg.width + 6.0,
                        y + 28.0,
                        percent
                    ));
                }
            }
        }
    }

    parts.push(format!(
        r##"<text x="{}" y="{}" font-size="14" font-family="{FONT}" fill="#627d98">{}</text>"##,
        l.left_margin,
        height - l.footer_offset,
        escape_text(&config.source_note)
    ));
    parts.push("</svg>".to_string());
    parts.join("\n")
}
