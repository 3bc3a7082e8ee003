mod config;
mod error;
mod model;
mod normalize;
mod scan;
mod sources;
mod utils;

pub use error::{Error, Result};

use config::Config;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use utils::{ensure_dir, log::init_tracing_subscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = config::command();
    let matches = cli.clone().get_matches();

    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}\n", err);
            eprintln!("{}", cli.render_help());
            return Err(err);
        }
    };

    // create output dir before anything is written in it
    if let Some(output_dir) = &config.output_dir {
        if let Err(err) = ensure_dir(output_dir) {
            eprintln!(
                "Çıktı dizini oluşturulamadı ({}): {}",
                output_dir.display(),
                err
            );
            return Err(err);
        }
    }

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let log_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    init_tracing_subscriber(config.save_logs, &log_dir, &timestamp.to_string())?;

    let domains = match config.domains() {
        Ok(domains) => domains,
        Err(err) => {
            error!("Reading domains from {:?}: {}", config.input, err);
            return Err(err);
        }
    };
    info!("{} domains to query (run_{})", domains.len(), timestamp);

    let summary = scan::run(&config, &domains).await?;
    summary.display()?;

    Ok(())
}
