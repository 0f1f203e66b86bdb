use clap::{Args, Parser, Subcommand};

use crate::encoding::OutputEncoding;

pub const DEFAULT_INDEX_URL: &str =
    "https://avatar.fandom.com/wiki/List_of_Avatar:_The_Last_Airbender_episodes";
pub const DEFAULT_BASE_URL: &str = "https://avatar.fandom.com/wiki/Transcript:";
pub const DEFAULT_OUT: &str = "avatar_the_last_airbender_transcript.txt";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape every listed episode and write the transcript file.
    Build(BuildArgs),
    /// Print the transcript links found on the index page.
    Links(LinksArgs),
    /// Format a single transcript page to stdout.
    Episode(EpisodeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Index page listing every episode.
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Prefix joined with each episode's wiki path.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Debug, Clone, Args)]
pub struct HttpArgs {
    /// Per-request timeout.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub http: HttpArgs,

    /// Output transcript file (overwritten).
    #[arg(long, default_value = DEFAULT_OUT)]
    pub out: String,

    /// Character encoding of the output file.
    #[arg(long, value_enum, default_value_t = OutputEncoding::Utf8)]
    pub encoding: OutputEncoding,

    /// Only scrape the first N episodes.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub http: HttpArgs,

    /// Print one JSON record per link instead of bare URLs.
    #[arg(long)]
    pub jsonl: bool,
}

#[derive(Debug, Args)]
pub struct EpisodeArgs {
    /// Transcript page URL.
    #[arg(long)]
    pub url: String,

    #[command(flatten)]
    pub http: HttpArgs,

    /// Character encoding of the output.
    #[arg(long, value_enum, default_value_t = OutputEncoding::Utf8)]
    pub encoding: OutputEncoding,
}
