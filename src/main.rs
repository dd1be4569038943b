mod cli;
mod lang;
mod report;
mod settings;
mod translate;
mod wiki;

pub const USER_AGENT: &str = concat!("wt/", env!("CARGO_PKG_VERSION"), " (interlanguage lookup CLI)");

use std::error::Error;
use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Invocation};
use settings::Settings;
use wiki::WikipediaClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = error_chain(e.as_ref());
            debug!(error = %message, "wt failed");
            eprintln!("wt: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wt=warn")),
        )
        .init();

    let cli = Cli::parse();
    if cli.args.is_empty() {
        print!("{}", Cli::command().render_long_help());
        return Ok(());
    }

    let invocation = Invocation::from_args(&cli.args);
    let path = settings::settings_path()?;
    let mut settings = Settings::load(&path)?;
    settings.apply(&invocation.overrides);
    settings.normalize();

    if invocation.save || !invocation.has_query() {
        settings.save(&path)?;
    }
    if invocation.print_settings {
        println!("{}:", path.display());
        print!("{}", settings.pretty()?);
    }
    if !invocation.has_query() {
        return Ok(());
    }

    let client = WikipediaClient::from_env(wiki::http_client()?);
    let rows = translate::translate(&client, &settings, &invocation.query).await?;
    print!("{}", report::render(&rows));
    Ok(())
}

fn error_chain(e: &dyn Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
