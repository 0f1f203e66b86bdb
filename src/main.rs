use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    wikiscript::logging::init().context("init logging")?;

    let cli = wikiscript::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        wikiscript::cli::Command::Build(args) => {
            wikiscript::run::build(args).context("build")?;
        }
        wikiscript::cli::Command::Links(args) => {
            wikiscript::run::links(args).context("links")?;
        }
        wikiscript::cli::Command::Episode(args) => {
            wikiscript::run::episode(args).context("episode")?;
        }
    }

    Ok(())
}
