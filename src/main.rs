use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vedika::{
    create_router, AppState, ChatTranslator, Config, CredentialStore, FfmpegCapturer,
    NatsPublisher, Orchestrator, PipelineConfig, SessionRegistry, WhisperApiTranscriber,
    YtDlpResolver,
};

#[derive(Debug, Parser)]
#[command(name = "vedika", about = "Live campaign stream transcription service")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/vedika")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    info!("{} starting", cfg.service.name);

    let credentials = Arc::new(CredentialStore::new(cfg.openai.api_key.clone()));
    if credentials.is_set() {
        info!("Transcription credential loaded from config");
    } else {
        info!("No credential in config; waiting for a start request to supply one");
    }

    let publisher = Arc::new(NatsPublisher::connect(&cfg.nats.url).await?);

    let orchestrator = Orchestrator::new(
        Arc::new(SessionRegistry::new()),
        Arc::clone(&credentials),
        Arc::new(YtDlpResolver::new(cfg.pipeline.ytdlp_bin.clone())),
        Arc::new(FfmpegCapturer::new(cfg.pipeline.ffmpeg_bin.clone())),
        Arc::new(WhisperApiTranscriber::new(
            Arc::clone(&credentials),
            cfg.openai.api_base.clone(),
            cfg.openai.transcribe_model.clone(),
        )),
        Arc::new(ChatTranslator::new(
            Arc::clone(&credentials),
            cfg.openai.api_base.clone(),
            cfg.openai.translate_model.clone(),
        )),
        publisher,
        PipelineConfig::from(&cfg.pipeline),
    );

    let app = create_router(AppState::new(orchestrator));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP control API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
