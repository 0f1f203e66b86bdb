use anyhow::Context as _;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::formats::EpisodeLink;

const WIKI_MARKER: &str = "/wiki/";

pub fn fetch_episode_links(
    client: &Client,
    index_url: &str,
    base_url: &str,
) -> anyhow::Result<Vec<EpisodeLink>> {
    let html = crate::fetch::fetch_html(client, index_url).context("fetch index page")?;
    let links = collect_episode_links(&html, base_url)?;
    tracing::info!(index = %index_url, count = links.len(), "collected episode links");
    Ok(links)
}

/// Every `<b>` wrapping a wiki anchor contributes one link, in page order.
pub fn collect_episode_links(html: &str, base_url: &str) -> anyhow::Result<Vec<EpisodeLink>> {
    let bold = selector("b")?;
    let anchor = selector("a[href]")?;
    let document = Html::parse_document(html);

    let links = document
        .select(&bold)
        .filter_map(|b| {
            b.select(&anchor)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| href.contains(WIKI_MARKER))
        })
        .map(|href| {
            let page: String = href.chars().skip(WIKI_MARKER.chars().count()).collect();
            EpisodeLink::new(format!("{base_url}{page}"))
        })
        .collect();

    Ok(links)
}

pub(crate) fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow::anyhow!("parse selector {css:?}: {err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/wiki/Transcript:";

    #[test]
    fn bold_wiki_anchors_become_transcript_links() -> anyhow::Result<()> {
        let html = r#"<html><body>
<table>
  <tr><td><b><a href="/wiki/The_Boy_in_the_Iceberg">The Boy in the Iceberg</a></b></td></tr>
  <tr><td><b>Unreleased</b></td></tr>
  <tr><td><a href="/wiki/Not_Bold">Not bold</a></td></tr>
  <tr><td><b><a href="https://elsewhere.example/page">External</a></b></td></tr>
  <tr><td><b><span><a href="/wiki/The_Avatar_Returns">The Avatar Returns</a></span></b></td></tr>
</table>
</body></html>"#;

        let links = collect_episode_links(html, BASE)?;

        assert_eq!(
            links,
            vec![
                EpisodeLink::new(format!("{BASE}The_Boy_in_the_Iceberg")),
                EpisodeLink::new(format!("{BASE}The_Avatar_Returns")),
            ]
        );
        Ok(())
    }

    #[test]
    fn duplicates_and_order_are_preserved() -> anyhow::Result<()> {
        let html = r#"<p><b><a href="/wiki/B">B</a></b> <b><a href="/wiki/A">A</a></b>
<b><a href="/wiki/B">B again</a></b></p>"#;

        let links = collect_episode_links(html, BASE)?;
        let urls: Vec<&str> = links.iter().map(EpisodeLink::as_str).collect();

        assert_eq!(
            urls,
            vec![
                "https://example.com/wiki/Transcript:B",
                "https://example.com/wiki/Transcript:A",
                "https://example.com/wiki/Transcript:B",
            ]
        );
        Ok(())
    }

    #[test]
    fn first_matching_anchor_wins() -> anyhow::Result<()> {
        let html = r#"<b><a href="/index.php">skip</a><a href="/wiki/First">1</a><a href="/wiki/Second">2</a></b>"#;

        let links = collect_episode_links(html, BASE)?;

        assert_eq!(links, vec![EpisodeLink::new(format!("{BASE}First"))]);
        Ok(())
    }
}
