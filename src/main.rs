use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use metar_decode::cli::{Args, Command};
use metar_decode::config::Config;
use metar_decode::decoder::decode_metar;
use metar_decode::models::{AppState, ParsedMetar};
use metar_decode::routes::create_router;
use metar_decode::services::{normalize_station, retrieve_metar, HttpFetcher};
use metar_decode::utils::display_list;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(&args.log_level);

    if let Err(e) = run(args).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_args(&args)?;

    match args.command {
        Command::Serve { .. } => {
            let addr = config
                .bind_addr
                .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));
            serve(&config, addr).await?;
        }
        Command::Show { station } => {
            let fetcher = HttpFetcher::new(&config)?;
            let metar = retrieve_metar(&fetcher, &station).await?;
            print_metar(&metar);
        }
        Command::Decode { raw, station } => {
            let station = station
                .map(|s| normalize_station(&s))
                .or_else(|| raw.split_whitespace().next().map(str::to_string))
                .unwrap_or_default();
            let metar = decode_metar(&raw, &station)?;
            print_metar(&metar);
        }
    }

    Ok(())
}

async fn serve(config: &Config, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(config)?;
    let app = create_router(Arc::new(AppState::new(fetcher)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, provider = ?config.provider, "server running");
    axum::serve(listener, app).await?;
    Ok(())
}

// prints the decoded fields one per line
fn print_metar(metar: &ParsedMetar) {
    println!("Station: {}", metar.station);
    println!("Report Time: {}", metar.report_time);
    println!("Winds: {}", display_list(&metar.winds));
    println!("Visibility: {}", metar.visibility);
    println!("Conditions: {}", display_list(&metar.conditions));
    println!("Clouds: {}", display_list(&metar.clouds));
    println!("Temperature: {}", metar.temperature);
    println!("Dewpoint: {}", metar.dew_point);
    println!("Altimeter: {}", metar.altimeter);
    println!("Remarks: {}", display_list(&metar.remarks));
}

fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_decode={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
