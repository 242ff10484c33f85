// Main entry point
use clap::Parser;
use colored::Colorize;
use holdings_admin::application::investments::fetch_investment;
use holdings_admin::application::report::{export_report, generate_report};
use holdings_admin::infrastructure::config::{self, Config, Logging};
use holdings_admin::interfaces::cli::{Cli, Command};
use holdings_admin::interfaces::server;
use holdings_admin::state::AppState;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::GenerateConfig) {
        let path = config::generate_config_sample(cli.config.as_deref())?;
        println!("Config file: {}", path.display());
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref())?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    match cli.command {
        Command::Serve { port } => run_server(config, port).await?,
        Command::Report { export, output } => {
            let state = AppState::new(config)?;
            let csv = generate_report(&state).await?;
            if export {
                export_report(&state, &csv).await?;
            }
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &csv).await?;
                    eprintln!("{} {}", "Report written to".green(), path.display());
                }
                None => print!("{}", csv),
            }
        }
        Command::Investment { id } => {
            let state = AppState::new(config)?;
            let investment = fetch_investment(&state, &id).await?;
            println!("{}", serde_json::to_string_pretty(&investment)?);
        }
        Command::Status => print_status(&config, cli.config.as_deref()),
        // handled before the config is loaded
        Command::GenerateConfig => {}
    }

    Ok(())
}

async fn run_server(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.port);
    let clear_every = config.cache_clear_interval();
    let state = AppState::new(config)?;

    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nShutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let clear_task = state.cache.spawn_clear_task(clear_every);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("{} {}", "Error occurred starting the server:".red(), e);
            clear_task.abort();
            std::process::exit(1);
        }
    };
    println!("Server running on port {}", port);

    let result = server::serve(state, listener, async move {
        let _ = shutdown_rx.await;
    })
    .await;

    clear_task.stop().await;
    result?;
    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(config: &Config, config_path: Option<&Path>) {
    println!("{}", "holdings-admin Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config_path
            .map(Path::to_path_buf)
            .or_else(config::get_config_path)
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Investments service: {}", config.investments_url());
    println!("Companies service: {}", config.companies_url());
    println!("Port: {}", config.port);
    println!("Request timeout: {}s", config.request_timeout_secs);
    println!("Header read timeout: {}s", config.header_read_timeout_secs);
    println!(
        "Company cache cleared every: {}ms",
        config.cache_clear_interval_ms
    );
}
