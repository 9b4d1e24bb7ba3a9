use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use spdlog::{info, warn};

use taichi_site::config::{read_config, Config};
use taichi_site::logger::configure_logger;
use taichi_site::server::server_run;

const CFG_FILE_NAME: &str = "taichi-site.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

fn open_config(config_path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        return Ok(read_config(&path)?);
    }

    // Default lookup: next to the executable, then the working directory
    let exe_path = env::current_exe()?;
    let exe_dir = exe_path.parent().unwrap();
    for candidate in [exe_dir.join(CFG_FILE_NAME), PathBuf::from(CFG_FILE_NAME)] {
        if candidate.is_file() {
            return Ok(read_config(&candidate)?);
        }
    }

    bail!("Could not find {} next to the executable or in the current directory", CFG_FILE_NAME)
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run taichi-site --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting taichi-site =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await?;
    Ok(())
}
