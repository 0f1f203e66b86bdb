use std::fmt;

use serde::{Deserialize, Serialize};

/// URL of one episode's transcript page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeLink(String);

impl EpisodeLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of `links --jsonl` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub index: usize,
    pub url: String,
}

/// Title and transcript rows scraped from one episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeTable {
    pub title: String,
    pub rows: Vec<TableRow>,
}

/// A transcript table row. Always holds at least one data cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    header: Option<String>,
    cells: Vec<String>,
}

impl TableRow {
    pub fn new(header: Option<String>, cells: Vec<String>) -> anyhow::Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("table row has no data cell");
        }
        Ok(Self { header, cells })
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// The cell carrying the row's text. Rows with more than one data cell
    /// lead with an empty spacer column.
    pub fn content_cell(&self) -> &str {
        match self.cells.as_slice() {
            [only] => only,
            [_, second, ..] => second,
            [] => "",
        }
    }
}

/// A formatted output fragment and the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine<'a> {
    pub text: String,
    pub link: &'a EpisodeLink,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    pub repaired: usize,
    pub dropped: usize,
}
