mod args;
mod client;
mod config;
mod dotenv;
mod env;
mod error;

use clap::Parser;
use colored::*;
use serde::Serialize;

use crate::args::Args;
use crate::client::OpenAIClient;
use crate::config::{LoadSummary, Settings};
use crate::env::EnvStore;
use crate::error::ConfigError;

#[derive(Serialize)]
struct Report<'a> {
    key_name: &'a str,
    key_preview: &'a str,
    api_base: &'a str,
    env: &'a LoadSummary,
}

fn main() {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .init();

    if let Err(err) = run(&args) {
        eprintln!("{}", format!("Error: {}", err).red());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let settings = Settings::from(args);
    let mut store = EnvStore::from_process();
    log::debug!("Read {} variables from the process environment", store.len());

    let boot = config::bootstrap(&settings, &mut store, |key| {
        OpenAIClient::new(key, &args.api_base)
    })?;

    if args.json {
        let report = Report {
            key_name: &settings.key_name,
            key_preview: &boot.key_preview,
            api_base: boot.client.api_base(),
            env: &boot.summary,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Could not serialize report: {}", err),
        }
    } else {
        println!(
            "{} {} ({}) for {}",
            "OpenAI client configured with".bright_green(),
            settings.key_name,
            boot.key_preview.dimmed(),
            boot.client.api_base()
        );
    }

    Ok(())
}
