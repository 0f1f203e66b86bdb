use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use reqwest::blocking::Client;

use crate::cli::{BuildArgs, EpisodeArgs, LinksArgs};
use crate::formats::{EpisodeLink, LinkRecord, WriteStats};
use crate::transcript::EpisodeTranscript;
use crate::writer::TranscriptWriter;

pub fn build(args: BuildArgs) -> anyhow::Result<WriteStats> {
    let out_path = PathBuf::from(&args.out);
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    let file = File::create(&out_path)
        .with_context(|| format!("create transcript: {}", out_path.display()))?;
    let mut writer = TranscriptWriter::new(BufWriter::new(file), args.encoding);

    let client = crate::fetch::http_client(args.http.timeout_secs)?;
    let mut links = crate::links::fetch_episode_links(
        &client,
        &args.source.index_url,
        &args.source.base_url,
    )
    .context("collect episode links")?;
    if let Some(limit) = args.limit {
        links.truncate(limit);
    }

    for (index, link) in links.iter().enumerate() {
        tracing::info!(episode = index + 1, total = links.len(), %link, "scrape episode");
        write_episode(&client, &mut writer, link)?;
    }

    let (_, stats) = writer.finish()?;
    tracing::info!(
        out = %out_path.display(),
        episodes = links.len(),
        written = stats.written,
        repaired = stats.repaired,
        dropped = stats.dropped,
        "transcript written"
    );
    Ok(stats)
}

pub fn links(args: LinksArgs) -> anyhow::Result<()> {
    let client = crate::fetch::http_client(args.http.timeout_secs)?;
    let links = crate::links::fetch_episode_links(
        &client,
        &args.source.index_url,
        &args.source.base_url,
    )
    .context("collect episode links")?;

    let mut out = std::io::stdout().lock();
    for (index, link) in links.into_iter().enumerate() {
        if args.jsonl {
            let record = LinkRecord {
                index,
                url: link.as_str().to_owned(),
            };
            serde_json::to_writer(&mut out, &record).context("write link record json")?;
            out.write_all(b"\n").context("write link record newline")?;
        } else {
            writeln!(out, "{link}").context("write link")?;
        }
    }
    out.flush().context("flush links")?;
    Ok(())
}

pub fn episode(args: EpisodeArgs) -> anyhow::Result<WriteStats> {
    let client = crate::fetch::http_client(args.http.timeout_secs)?;
    let link = EpisodeLink::new(args.url);

    let mut writer = TranscriptWriter::new(std::io::stdout().lock(), args.encoding);
    write_episode(&client, &mut writer, &link)?;
    let (_, stats) = writer.finish()?;
    Ok(stats)
}

fn write_episode<W: Write>(
    client: &Client,
    writer: &mut TranscriptWriter<W>,
    link: &EpisodeLink,
) -> anyhow::Result<()> {
    let table = crate::page::fetch_episode_table(client, link)?;
    let rows = table.rows.len();
    let stats = writer
        .write_all(EpisodeTranscript::new(link, table))
        .context("write episode")?;
    tracing::debug!(
        %link,
        rows,
        written = stats.written,
        repaired = stats.repaired,
        dropped = stats.dropped,
        "episode written"
    );
    Ok(())
}
