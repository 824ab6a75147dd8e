//! Page-level cross-references between sections of a document.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// References spanning this many pages or fewer are dropped as local.
pub const MIN_SIGNIFICANT_SPAN: u64 = 3;

pub const FROM_PAGE_COLUMN: &str = "From Page";
pub const TO_PAGE_COLUMN: &str = "To Page";
pub const FROM_SECTION_COLUMN: &str = "From Section";
pub const TO_SECTION_COLUMN: &str = "To Section";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub from_page: i64,
    pub to_page: i64,
    pub from_section: String,
    pub to_section: String,
}

impl CrossReference {
    pub fn span(&self) -> u64 {
        self.to_page.abs_diff(self.from_page)
    }

    pub fn direction(&self) -> RefDirection {
        if self.to_page > self.from_page {
            RefDirection::Forward
        } else {
            RefDirection::Backward
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub page: i64,
    pub title: String,
}

pub fn load_cross_references(path: impl AsRef<Path>) -> Result<Vec<CrossReference>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let refs = read_cross_references(file)?;
    tracing::info!(path = %path.display(), references = refs.len(), "loaded cross-references");
    Ok(refs)
}

/// Reads a headed CSV, keeping rows with integer pages more than
/// [`MIN_SIGNIFICANT_SPAN`] pages apart. Unusable rows are skipped.
pub fn read_cross_references<R: Read>(reader: R) -> Result<Vec<CrossReference>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let columns = (
        column(FROM_PAGE_COLUMN),
        column(TO_PAGE_COLUMN),
        column(FROM_SECTION_COLUMN),
        column(TO_SECTION_COLUMN),
    );
    let (Some(from_page_ix), Some(to_page_ix), Some(from_section_ix), Some(to_section_ix)) =
        columns
    else {
        tracing::warn!(
            headers = ?headers.iter().collect::<Vec<_>>(),
            "cross-reference CSV is missing required columns; no rows used"
        );
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(err) => {
                tracing::debug!(row = line + 1, %err, "skipping malformed CSV record");
                continue;
            }
        };

        let field = |ix: usize| record.get(ix).map(str::trim);
        let (Some(from_page), Some(to_page)) = (
            field(from_page_ix).and_then(parse_page),
            field(to_page_ix).and_then(parse_page),
        ) else {
            tracing::debug!(row = line + 1, "skipping row without integer pages");
            continue;
        };
        // Short rows keep the reference with blank section labels.
        let from_section = record.get(from_section_ix).unwrap_or_default();
        let to_section = record.get(to_section_ix).unwrap_or_default();

        let xref = CrossReference {
            from_page,
            to_page,
            from_section: from_section.to_string(),
            to_section: to_section.to_string(),
        };
        if xref.span() > MIN_SIGNIFICANT_SPAN {
            out.push(xref);
        }
    }
    Ok(out)
}

fn parse_page(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>().ok()
}

pub fn partition_by_direction(
    refs: &[CrossReference],
) -> (Vec<&CrossReference>, Vec<&CrossReference>) {
    refs.iter()
        .partition(|r| r.direction() == RefDirection::Forward)
}
