use std::path::PathBuf;

use clap::Parser;

use crate::config::{OverridePolicy, Settings};

/// Load a .env file and check that the OpenAI key is present
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path of the dotenv file to load (a missing file is fine)
    #[arg(long, default_value = ".env")]
    pub(crate) env_file: PathBuf,

    /// Name of the variable holding the API key
    #[arg(long, default_value = "OPEN_AI_KEY")]
    pub(crate) key_name: String,

    /// Base URL handed to the OpenAI client
    #[arg(long, default_value = crate::client::DEFAULT_API_BASE)]
    pub(crate) api_base: String,

    /// Let values from the file replace variables already set in the environment
    #[arg(long = "override")]
    pub(crate) override_existing: bool,

    /// Print the bootstrap report as JSON
    #[arg(long)]
    pub(crate) json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Self {
            env_file: args.env_file.clone(),
            key_name: args.key_name.clone(),
            policy: if args.override_existing {
                OverridePolicy::Override
            } else {
                OverridePolicy::Preserve
            },
        }
    }
}
