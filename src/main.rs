use clap::Parser;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

mod cli;
mod core;
mod crypto;
mod generators;
mod models;
mod utils;

use crate::cli::Args;
use crate::core::config::Config;
use crate::core::vault::Vault;

// Log to the configured file so stdout stays free for the menu
fn init_logging(config: &Config) {
    let file = utils::ensure_parent_dir(&config.log_file)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&config.log_file));

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true);

    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file))).init();
        }
        Err(e) => {
            builder.filter_level(log::LevelFilter::Warn).init();
            log::warn!("Cannot open log file {}: {}", config.log_file.display(), e);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    if let Some(store) = &args.store {
        config.store_file = store.clone();
    }
    if let Some(key_file) = &args.key_file {
        config.key_file = key_file.clone();
    }

    init_logging(&config);
    log::info!("🔒 Starting password tool");
    log::debug!("Loaded config: {:?}", config);

    let key = match crate::core::keys::ensure_key(&config.key_file) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Key setup failed: {}", e);
            eprintln!("❌ Could not load the encryption key: {e}");
            eprintln!("• Check that {} is readable, or point PASSTOOL_KEY_FILE / --key-file elsewhere", config.key_file.display());
            return Err(Box::new(e));
        }
    };
    let vault = Vault::new(&config.store_file, key);
    log::debug!("Using store {}", vault.store_path().display());

    if let Some(command) = args.command {
        return cli::handlers::run_command(command, &vault, &config, args.json);
    }

    let should_exit = Arc::new(AtomicBool::new(false));
    {
        let should_exit = Arc::clone(&should_exit);
        if let Err(e) = ctrlc::set_handler(move || {
            log::info!("🔴 Ctrl+C received. Shutting down...");
            should_exit.store(true, Ordering::SeqCst);
            println!("\nGoodbye 👋");
            std::process::exit(0);
        }) {
            log::warn!("Failed to set Ctrl+C handler: {}", e);
        }
    }

    cli::menu::run_cli_menu(&vault, &config, should_exit).map_err(|e| {
        log::error!("CLI menu error: {}", e);
        e
    })?;

    log::info!("✅ Password tool shutdown complete.");
    Ok(())
}
