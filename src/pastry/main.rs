use clap::Parser;
use directories::ProjectDirs;
use pastry::api::PastryApi;
use pastry::config::PastryConfig;
use pastry::error::{PastryError, Result};
use pastry::server::{self, ConnOptions, Listeners};
use pastry::store::fs::FileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod args;
use args::Cli;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct Dirs {
    config: PathBuf,
    cache: PathBuf,
}

fn resolve_dirs(cli: &Cli) -> Result<Dirs> {
    if let Some(home) = &cli.home {
        return Ok(Dirs {
            config: home.clone(),
            cache: home.clone(),
        });
    }
    let proj_dirs = ProjectDirs::from("dev", "gmelchett", "pastry")
        .ok_or_else(|| PastryError::Config("could not determine home directory".to_string()))?;
    Ok(Dirs {
        config: proj_dirs.config_dir().to_path_buf(),
        cache: proj_dirs.cache_dir().to_path_buf(),
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dirs = resolve_dirs(&cli)?;
    let mut config = PastryConfig::load(&dirs.config)?;
    cli.apply(&mut config);
    config.validate()?;

    if cli.save_config {
        config.save(&dirs.config)?;
        println!("{}", dirs.config.join("config.json").display());
        return Ok(());
    }

    let store = FileStore::new(config.cache_file_in(&dirs.cache));
    store.ensure_parent()?;
    tracing::info!(path = %store.path().display(), "snippet cache");
    let api = Arc::new(PastryApi::open(store));

    let listeners = Listeners::bind(&config).await.inspect_err(|e| {
        tracing::error!(error = %e, "startup failed");
    })?;

    server::serve(listeners, api, ConnOptions::from(&config)).await
}
