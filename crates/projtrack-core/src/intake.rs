//! JSON-lines project intake
//!
//! Each non-blank line is one form submission:
//! `{"title": "...", "description": "...", "people": 3}`. `people` may be a
//! number or a string; missing fields count as empty input. Lines starting
//! with `#` are skipped.

use crate::error::{Error, Result};
use crate::form::ProjectInput;
use serde::Deserialize;
use serde_json::Value;
use std::io::BufRead;

/// Raw field values for one submission
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub people: Value,
    /// 1-based line number in the source
    #[serde(skip)]
    pub line: usize,
}

impl ProjectRecord {
    /// The people field as the text a user would have typed
    pub fn people_text(&self) -> String {
        match &self.people {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Copy these values into `form`
    pub fn fill(&self, form: &mut ProjectInput) {
        form.fill(self.title.as_str(), self.description.as_str(), self.people_text());
    }
}

/// Parse every record from `reader`
pub fn read_records(reader: impl BufRead) -> Result<Vec<ProjectRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut record: ProjectRecord = serde_json::from_str(trimmed)
            .map_err(|e| Error::MalformedRecord(idx + 1, e.to_string()))?;
        record.line = idx + 1;
        records.push(record);
    }

    Ok(records)
}
