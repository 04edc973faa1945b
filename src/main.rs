mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use pb_core::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "peakbagger=trace,pb_server=debug,pb_db=debug,pb_core=debug,tower_http=debug".to_string()
        } else {
            "peakbagger=info,pb_server=info,pb_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { host, port, db } => {
            let mut config = Config::load_or_default(cli.config.as_deref());
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(db) = db {
                config.database.path = db;
            }

            tracing::info!(
                "Starting peakbagger on {}:{}",
                config.server.host,
                config.server.port
            );
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(pb_server::start(config))?;
            Ok(())
        }
        Commands::Migrate { db } => {
            let config = Config::load_or_default(cli.config.as_deref());
            migrate(db.unwrap_or(config.database.path), config.database.pool_size)
        }
        Commands::Validate { config } => {
            let path = config.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("peakbagger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn migrate(db_path: PathBuf, pool_size: u32) -> Result<()> {
    let pool = pb_db::pool::init_pool(&db_path, pool_size)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let conn = pb_db::pool::get_conn(&pool)?;
    let version = pb_db::migrations::current_version(&conn)?;
    println!("Database {} is at schema version {version}", db_path.display());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        anyhow::bail!("No config file given; pass one with --config or as an argument");
    };

    let config = Config::load(path)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid: {}", path.display());
    } else {
        println!("Configuration is valid with {} warning(s):", warnings.len());
        for w in &warnings {
            println!("  - {w}");
        }
    }
    Ok(())
}
