use std::collections::VecDeque;
use std::vec;

use crate::formats::{EpisodeLink, EpisodeTable, TableRow, TranscriptLine};

/// Maximum width of a body line, counting the space after its last word.
pub const LINE_WIDTH: usize = 72;

/// Single-pass stream of the formatted lines of one episode.
///
/// The title line comes first, then the lines of every row in table order,
/// then the two-newline separator. Create a new one to format the episode
/// again.
pub struct EpisodeTranscript<'a> {
    link: &'a EpisodeLink,
    title: Option<String>,
    rows: vec::IntoIter<TableRow>,
    pending: VecDeque<String>,
    separator_emitted: bool,
}

impl<'a> EpisodeTranscript<'a> {
    pub fn new(link: &'a EpisodeLink, table: EpisodeTable) -> Self {
        Self {
            link,
            title: Some(table.title),
            rows: table.rows.into_iter(),
            pending: VecDeque::new(),
            separator_emitted: false,
        }
    }

    fn line(&self, text: String) -> TranscriptLine<'a> {
        TranscriptLine {
            text,
            link: self.link,
        }
    }
}

impl<'a> Iterator for EpisodeTranscript<'a> {
    type Item = TranscriptLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(title) = self.title.take() {
            return Some(self.line(format!("Episode: {title}\n")));
        }

        loop {
            if let Some(text) = self.pending.pop_front() {
                return Some(self.line(text));
            }
            match self.rows.next() {
                Some(row) => self.pending.extend(format_row(&row)),
                None => break,
            }
        }

        if self.separator_emitted {
            return None;
        }
        self.separator_emitted = true;
        Some(self.line("\n\n".to_owned()))
    }
}

/// All output lines of one table row, each newline-terminated.
pub fn format_row(row: &TableRow) -> Vec<String> {
    let mut lines = vec!["\n".to_owned()];
    let is_dialogue = match row.header() {
        Some(header) => {
            lines.push(format!("{}:\n", drop_last_char(header)));
            true
        }
        None => false,
    };

    let text = row.content_cell().replace('\n', "");
    let mut phrases = Vec::new();
    for segment in split_directions(&text) {
        if !is_dialogue || segment.starts_with('[') {
            phrases.push(segment.to_owned());
        } else if !segment.trim().is_empty() {
            phrases.push(quote_segment(segment));
        }
    }

    let joined = phrases.join(" ");
    lines.extend(wrap_words(joined.split_whitespace(), LINE_WIDTH));
    lines
}

fn drop_last_char(text: &str) -> &str {
    match text.char_indices().next_back() {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Split before every `[` and after every `]`, so that bracketed stage
/// directions land in segments of their own. Empty segments are kept.
pub fn split_directions(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => {
                segments.push(&text[start..idx]);
                start = idx;
            }
            ']' => {
                let end = idx + ch.len_utf8();
                segments.push(&text[start..end]);
                start = end;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Wrap spoken text in double quotes. A space at either edge is overwritten
/// by the quote rather than kept beside it.
pub fn quote_segment(segment: &str) -> String {
    let mut chars: Vec<char> = segment.chars().collect();

    match chars.first_mut() {
        Some(first) if *first == ' ' => *first = '"',
        _ => chars.insert(0, '"'),
    }
    match chars.last_mut() {
        Some(last) if *last == ' ' => *last = '"',
        _ => chars.push('"'),
    }

    chars.into_iter().collect()
}

/// Greedy word packing. A word longer than `width` still gets a line of
/// its own; nothing is flushed while the current line is empty, so an
/// over-long first word is never preceded by a blank line.
pub fn wrap_words<'w>(words: impl IntoIterator<Item = &'w str>, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in words {
        let word_width = word.chars().count() + 1;
        if current_width + word_width > width && !current.is_empty() {
            lines.push(flush(&mut current));
            current_width = 0;
        }
        current.push_str(word);
        current.push(' ');
        current_width += word_width;
    }
    if !current.is_empty() {
        lines.push(flush(&mut current));
    }
    lines
}

fn flush(current: &mut String) -> String {
    let mut line = std::mem::take(current);
    line.pop();
    line.push('\n');
    line
}
