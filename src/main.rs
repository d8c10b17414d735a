use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use taskboard::{config::ServerConfig, rest, AppContext};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "taskboard",
    about = "Minimal task-list web service — browser UI + JSON API",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "TASKBOARD_PORT")]
    port: Option<u16>,

    /// Bind address (default: 0.0.0.0 for all interfaces)
    #[arg(long, env = "TASKBOARD_BIND")]
    bind_address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKBOARD_LOG")]
    log: Option<String>,

    /// Log output format: "pretty" (human-readable) or "json"
    #[arg(long, env = "TASKBOARD_LOG_FORMAT")]
    log_format: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "TASKBOARD_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServerConfig::new(
        args.port,
        args.bind_address,
        args.log,
        args.log_format,
        args.log_file,
    );

    let _log_guard = setup_logging(&config.log, config.log_file.as_deref(), &config.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.bind_addr(),
        "starting taskboard"
    );

    let ctx = Arc::new(AppContext::new(config)?);
    rest::start_server(ctx).await
}

/// Initialise the tracing subscriber.
///
/// Logs go to stdout in compact or JSON format; with a log file configured
/// they are additionally written to a daily-rotated file. The returned guard
/// must stay alive for the file writer to flush.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("taskboard.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
                .init();
        }
        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
