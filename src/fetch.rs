use std::time::Duration;

use anyhow::Context as _;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};

pub fn http_client(timeout_secs: u64) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("build http client")
}

/// GET `url` and return its body. Any non-success status is an error.
pub fn fetch_html(client: &Client, url: &str) -> anyhow::Result<String> {
    let url = url::Url::parse(url).with_context(|| format!("parse url: {url}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("url must be http/https: {url}");
    }

    tracing::debug!(%url, "fetch page");
    let response = client
        .get(url.clone())
        .header(USER_AGENT, concat!("wikiscript/", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .with_context(|| format!("GET {url}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("GET {url}: http status {status}");
    }

    response
        .text()
        .with_context(|| format!("read body: {url}"))
}
