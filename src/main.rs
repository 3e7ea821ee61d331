mod config;

use config::{Config, ConfigLoader};
use std::env;
use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{Level, Subscriber, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
}

/// Subscriber used while the config is loading, before LOG_FILE is known.
fn startup_subscriber() -> impl Subscriber + Send + Sync + 'static {
    fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(io::stderr)
        .finish()
}

fn init_tracing(log_file: &str) -> io::Result<()> {
    let builder = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if log_file.is_empty() {
        builder.init();
    } else {
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }

    Ok(())
}

/// Print the resolved configuration with secrets redacted.
fn print_config(config: &Config) -> ExitCode {
    match serde_yaml::to_string(config) {
        Ok(yaml) => {
            print!("{yaml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render config: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let loaded =
        tracing::subscriber::with_default(startup_subscriber(), || ConfigLoader::new().load());
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if env::args().any(|arg| arg == "--check-config") {
        return print_config(&config);
    }

    if let Err(e) = init_tracing(config.log_file()) {
        eprintln!("Failed to open log file {}: {}", config.log_file(), e);
        return ExitCode::FAILURE;
    }

    if config.bot_login().is_empty() {
        warn!("BOT_USER_LOGIN is not set, the bot cannot recognise its own comments");
    }

    info!(
        address = %config.address(),
        app_id = config.github().app.integration_id,
        api_url = %config.github().v3_api_url,
        checklist_bytes = config.review_checklist().len(),
        "Review bot configured"
    );

    ExitCode::SUCCESS
}
