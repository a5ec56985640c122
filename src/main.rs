use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use unitconv::core::config::{self, CliOverrides};
use unitconv::tui;

#[derive(Parser)]
#[command(name = "unitconv", about = "Multi-category unit converter")]
struct Args {
    /// Category to open on start (length, weight, area, volume, speed, time, temperature, currency)
    #[arg(short, long)]
    category: Option<String>,

    /// Path of the history ledger file
    #[arg(long)]
    history_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to unitconv.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("unitconv.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            config::UnitConvConfig::default()
        }
    };
    let cli = CliOverrides {
        category: args.category,
        history_file: args.history_file,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("unitconv starting on category: {:?}", resolved.category);

    tui::run(resolved)
}
