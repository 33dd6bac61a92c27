use anyhow::Result;
use charsheet::cli::{self, Cli};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr so it never mixes with command output
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut stdout = std::io::stdout().lock();
    cli::run(cli, &mut stdout)
}
