use std::{process, sync::Arc};

use clap::Parser;
use log::{error, info};
use tokio::sync::Mutex;

use todoboard::{App, Cli, Config, TodoStore};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if cli.no_color || !config.color {
        console::set_colors_enabled(false);
    }

    let actor = config.actor(cli.address.clone());
    let store = Arc::new(Mutex::new(TodoStore::new()));
    let config_path = cli.config.clone().or_else(Config::default_path);
    let app = App::new(store, config, actor, cli.verbose).with_config_path(config_path);

    if let Err(e) = app.run(cli.command).await {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    info!("Application shutting down");
}
