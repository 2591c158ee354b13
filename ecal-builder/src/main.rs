use anyhow::Result;
use clap::Parser as ClapParser;
use ecal_builder::config::EcalConfig;
use ecal_builder::io::cli::Cli;
use ecal_builder::{EPOCH, assembly, io};
use ecal_rs::store::GeoStore;
use log::{info, warn};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            EcalConfig::default()
        }
        Some(config_file) => io::read_config(&config_file)?,
    };

    info!("[MAIN] Successfully parsed EcalConfig: {config:?}");

    let assembly = assembly::build(&config)?;
    let summary = assembly.summary()?;
    let world = assembly.registry.volume(assembly.world()?)?;

    info!("[MAIN] {summary}");
    info!(
        "[MAIN] top-level volume: {} ({}), constructed in {:.3}ms",
        world.name,
        world.material,
        EPOCH.elapsed_ms()
    );
    Ok(())
}
