use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Log to stderr so stdout stays free for `links` and `episode` output.
pub fn init() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER).context("build default log filter")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))
}
