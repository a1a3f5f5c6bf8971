use anyhow::Result;
use clap::Parser;
use resume_generator::cli::{handle_command, ResumeCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resume_generator=info")),
        )
        .init();

    let cli = ResumeCli::parse();
    handle_command(cli)
}
