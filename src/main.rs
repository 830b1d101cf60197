use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use backoffice::{
    cli::{Cli, Commands},
    client::HttpDataClient,
    commands,
    config::Config,
    resource::ResourceKind,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        screen: ResourceKind::Orders,
    });

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "backoffice=info");
    }

    let config = Config::from_env()?;
    config.validate()?;

    init_logging(&config.log_file, !command.is_interactive());
    info!("Using API at {}", config.base_url);

    match command {
        Commands::Tui { screen } => run_tui(config, screen).await,
        Commands::List { resource } => {
            let client = HttpDataClient::new(&config)?;
            match commands::list(resource, &client).await {
                Ok(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                    Ok(())
                }
                Err(e) => {
                    error!("Listing {} failed: {}", resource, e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Create { resource, fields } => {
            let client = HttpDataClient::new(&config)?;
            match commands::create(resource, &fields, &client).await {
                Ok(lines) => {
                    println!("Created {} entry. Current {}:", resource, resource);
                    for line in lines {
                        println!("{}", line);
                    }
                    Ok(())
                }
                Err(e) => {
                    error!("Creating {} entry failed: {}", resource, e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Log to the configured file, and to stderr as well when the terminal is not taken over
fn init_logging(log_file: &Path, to_stderr: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "backoffice.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

async fn run_tui(config: Config, screen: ResourceKind) -> Result<()> {
    info!("Launching TUI interface");

    let mut app = App::new(config)?;
    app.current_screen = screen;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("TUI failed: {}", e);
            Err(e).context("TUI terminated with an error")
        }
    }
}
