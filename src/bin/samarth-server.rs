use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info};
use samarth::dataset::Dataset;
use samarth::engine::Engine;
use samarth::errors::{self, Result};
use samarth::web;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (CSV)
    infile: String,
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: String,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

async fn process(args: &Args) -> Result<()> {
    let addr: SocketAddr = args
        .bind
        .parse()
        .map_err(|_| errors::invalid_argument(format!("cannot listen on '{}'", args.bind)))?;
    info!(target: "samarth", "read: {}", args.infile);
    let dataset = Dataset::from_path(&args.infile)?;
    dataset.statistics();
    let engine = Arc::new(Engine::new(dataset));
    web::serve(engine, addr).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args).await {
        Ok(()) => (),
        Err(e) => {
            error!(target: "samarth", "{e}");
            process::exit(1);
        }
    }
}
