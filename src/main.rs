mod cli;
mod config;
mod domain;
mod error;
mod infra;
mod media;
mod workflows;

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{AppError, EXIT_USAGE};
use infra::http::ReqwestGetter;
use infra::tmdb::TmdbClient;

fn main() {
    let args = cli::expand_single_dash_longs(std::env::args_os());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // clap's own failure code would collide with the config failure code
            process::exit(if e.use_stderr() { EXIT_USAGE } else { 0 });
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if e.shows_usage() {
            eprintln!("{}", Cli::command().render_help());
        }
        tracing::error!("{e}");
        process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<PathBuf, AppError> {
    let settings = cli.into_settings()?;

    let api_key =
        config::get_tmdb_api_key(settings.api_key.as_deref()).map_err(AppError::MissingApiKey)?;

    let client = TmdbClient::new(
        ReqwestGetter::new(),
        api_key,
        settings.language.clone(),
        settings.api_url.clone(),
    );

    workflows::fetch_poster(&client, &settings)
}
