use anyhow::Context as _;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html};

use crate::formats::{EpisodeLink, EpisodeTable, TableRow};
use crate::links::selector;

/// Label the wiki puts in front of every transcript heading.
const TITLE_LABEL: &str = "Transcript:";
const EPISODE_SUFFIX: &str = "(episode)";
const TABLE_CLASS: &str = "wikitable";

pub fn fetch_episode_table(client: &Client, link: &EpisodeLink) -> anyhow::Result<EpisodeTable> {
    let html = crate::fetch::fetch_html(client, link.as_str())
        .with_context(|| format!("fetch transcript page: {link}"))?;
    extract_episode_table(&html).with_context(|| format!("extract transcript: {link}"))
}

pub fn extract_episode_table(html: &str) -> anyhow::Result<EpisodeTable> {
    let document = Html::parse_document(html);

    let heading = document
        .select(&selector("h1#firstHeading")?)
        .next()
        .ok_or_else(|| anyhow::anyhow!("page has no h1#firstHeading"))?;
    let title = episode_title(&heading.text().collect::<String>());

    let mut rows = Vec::new();
    for table in document.select(&selector("table")?).filter(is_top_level_content_table) {
        for tbody in child_elements(table).filter(|el| el.value().name() == "tbody") {
            for tr in child_elements(tbody).filter(|el| el.value().name() == "tr") {
                let row = table_row(tr).with_context(|| format!("table row {}", rows.len() + 1))?;
                rows.push(row);
            }
        }
    }

    Ok(EpisodeTable { title, rows })
}

fn episode_title(heading: &str) -> String {
    let mut words = heading.split_whitespace();
    let mut parts = Vec::new();
    if let Some(first) = words.next() {
        let first: String = first.chars().skip(TITLE_LABEL.chars().count()).collect();
        if !first.is_empty() {
            parts.push(first);
        }
    }
    parts.extend(
        words
            .filter(|word| *word != EPISODE_SUFFIX)
            .map(str::to_owned),
    );
    parts.join(" ")
}

fn is_content_table(el: &ElementRef<'_>) -> bool {
    el.value().name() == "table" && el.value().classes().any(|class| class == TABLE_CLASS)
}

/// Content tables nested inside another content table are reached through
/// their outer table's rows and are skipped here.
fn is_top_level_content_table(table: &ElementRef<'_>) -> bool {
    is_content_table(table)
        && !table
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| is_content_table(&ancestor))
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn table_row(tr: ElementRef<'_>) -> anyhow::Result<TableRow> {
    let mut header = None;
    let mut cells = Vec::new();
    for cell in child_elements(tr) {
        match cell.value().name() {
            "th" if header.is_none() => header = Some(cell.text().collect::<String>()),
            "td" => cells.push(cell.text().collect::<String>()),
            _ => {}
        }
    }
    TableRow::new(header, cells)
}
