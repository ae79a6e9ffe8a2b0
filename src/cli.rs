use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Provider;

#[derive(Debug, Parser)]
#[command(name = "metar-decode", version, about = "Fetch and decode METAR reports")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Where raw reports are fetched from
    #[arg(long, value_enum, default_value_t = ProviderArg::AviationWeather, global = true)]
    pub provider: ProviderArg,

    /// API key for the CheckWX provider
    #[arg(long, env = "CHECKWX_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// HTTP timeout for provider requests, in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web viewer
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// Fetch the current report for a station and print its fields
    Show { station: String },
    /// Decode a raw report without fetching anything
    Decode {
        raw: String,
        /// Station used to label errors, defaults to the report's first token
        #[arg(long)]
        station: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Checkwx,
    AviationWeather,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Checkwx => Provider::CheckWx,
            ProviderArg::AviationWeather => Provider::AviationWeather,
        }
    }
}
