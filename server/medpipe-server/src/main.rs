//! MedPipe server binary

use std::env;
use std::io::IsTerminal;

use clap::Parser;
use colored::*;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medpipe_server::{create_app, MedPipeServer, ServerConfig};

/// MedPipe HTTP Server
#[derive(Parser, Debug)]
#[command(name = "medpipe-server")]
#[command(about = "Browser front end and REST API for the medical diagnosis pipeline")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("🩺 {}", "Starting MedPipe HTTP Server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let config = ServerConfig::from_env();
    info!(
        "🎙️ Transcription service: {}",
        config.pipeline.transcribe_url.bright_yellow()
    );
    info!(
        "🧠 Extraction service: {}",
        config.pipeline.extract_url.bright_yellow()
    );
    info!(
        "🧠 Diagnosis service: {}",
        config.pipeline.diagnosis_url.bright_yellow()
    );

    let server = MedPipeServer::with_config(config)?;
    let app = create_app(server);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        "🚀 {}",
        format!("MedPipe server running on http://{}", addr).bright_green()
    );
    info!(
        "📋 {}",
        format!("Browser UI available at: http://{}/", addr).bright_blue()
    );
    info!(
        "📋 {}",
        format!("API v1 available at: http://{}/api/v1", addr).bright_blue()
    );

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let is_development =
        env::var("MEDPIPE_ENV").unwrap_or_else(|_| "development".to_string()) == "development";
    let use_colors = env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "medpipe_server={},diagnosis_pipeline={},tower_http=info,reqwest=info",
            level, level
        )
        .into()
    });

    if is_development && use_colors {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .init();
        print_startup_banner();
    } else {
        // Production and redirected output get structured JSON lines.
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_ansi(false).json())
            .init();
    }
}

fn print_startup_banner() {
    println!(
        "{}",
        r#"
    ╔══════════════════════════════════════════════════╗
    ║                                                  ║
    ║        🩺  MedPipe Diagnosis Server  🩺          ║
    ║                                                  ║
    ║   Transcription · Extraction · Diagnosis         ║
    ║                                                  ║
    ╚══════════════════════════════════════════════════╝
"#
        .bright_cyan()
    );
}
