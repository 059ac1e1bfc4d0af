// src/load/mod.rs
pub mod utils;

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{
    collections::HashMap,
    fs,
    io::Read,
    path::Path,
};
use tracing::{debug, info, warn};

use utils::{clean_cell, strip_bom};

pub const RESPONSE_ID: &str = "ResponseId";
pub const START_DATE: &str = "StartDate";
pub const FINISHED: &str = "Finished";

/// Value of `StartDate` on the export's question-text row.
const QUESTION_TEXT_MARKER: &str = "Start Date";
const FINISHED_TRUE: &str = "True";

/// Completed responses from a survey CSV export.
#[derive(Debug)]
pub struct SurveyExport {
    /// Header name → column index, as the export names them.
    columns: HashMap<String, usize>,
    /// Rows that passed the completion filter, in file order.
    rows: Vec<StringRecord>,
    /// Rows dropped by the completion filter (metadata rows, unfinished responses).
    skipped: usize,
}

impl SurveyExport {
    /// Open and parse the export at `path`, keeping completed responses only.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read survey export: {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("Failed to parse survey export: {}", path.display()))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .context("reading CSV input")?;
        Self::from_bytes(&raw)
    }

    fn from_bytes(raw: &[u8]) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(strip_bom(raw));

        let headers = rdr.headers().context("reading CSV header row")?.clone();
        let mut columns = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            // last occurrence wins on duplicate headers
            columns.insert(clean_cell(name).to_string(), idx);
        }
        for required in [RESPONSE_ID, START_DATE, FINISHED] {
            if !columns.contains_key(required) {
                return Err(anyhow!("CSV export has no {} column", required));
            }
        }
        let (id_idx, start_idx, finished_idx) =
            (columns[RESPONSE_ID], columns[START_DATE], columns[FINISHED]);

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (idx, result) in rdr.records().enumerate() {
            // +2: one for the header row, one for 1-based line numbers
            let record = result.with_context(|| format!("CSV parse error at record {}", idx + 2))?;

            let completed = !record.get(id_idx).unwrap_or("").is_empty()
                && record.get(start_idx) != Some(QUESTION_TEXT_MARKER)
                && record.get(finished_idx) == Some(FINISHED_TRUE);
            if completed {
                rows.push(record);
            } else {
                skipped += 1;
            }
        }

        if rows.is_empty() {
            warn!(skipped, "no completed responses in export");
        } else {
            info!(completed = rows.len(), skipped, "loaded survey export");
        }

        Ok(Self {
            columns,
            rows,
            skipped,
        })
    }

    /// Number of completed responses.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Trimmed, non-empty answers in `column`, one per completed response
    /// that answered it. Errors when the export has no such column.
    pub fn answers<'a>(&'a self, column: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        let idx = *self
            .columns
            .get(column)
            .ok_or_else(|| anyhow!("CSV export has no column named {}", column))?;
        debug!(column, idx, "reading answers");
        Ok(self
            .rows
            .iter()
            .map(move |r| clean_cell(r.get(idx).unwrap_or("")))
            .filter(|s| !s.is_empty()))
    }
}
