// src/config/types.rs

use serde::{Deserialize, Serialize};

/// One charted question: the CSV column holding its answers and the card label.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct Question {
    pub column: String,
    pub label: String,
}

impl Question {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Rank every answer on a scale is treated as when it isn't listed anywhere.
pub const NEUTRAL_RANK: usize = 2;

/// Rank used for ordering unlisted answers after every listed one.
pub const UNRANKED_ORDER: usize = 999;
