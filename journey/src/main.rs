use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journey::api::{create_router, AppState};
use journey::config::Config;
use journey::llm::{LlmBackend, LlmProvider};
use journey::store::RecordStore;

#[derive(Parser)]
#[command(name = "journey")]
#[command(about = "Health journey dashboard and grounded assistant")]
struct Args {
    /// Member record to serve (JSON). Overrides JOURNEY_RECORD_PATH.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Validate the record, print a short summary and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "journey=info,tower_http=debug".into());
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = Config::from_env();
    if args.record.is_some() {
        config.records.path = args.record;
    }

    let store = RecordStore::load(config.records.path.as_deref())?;
    tracing::info!(
        member = %store.member().name,
        total_weeks = store.total_weeks(),
        interventions = store.interventions().len(),
        "Record loaded"
    );

    if args.check {
        println!(
            "{}: {} weeks, {} interventions, {} conversation weeks",
            store.member().name,
            store.total_weeks(),
            store.interventions().len(),
            store.conversations().count()
        );
        return Ok(());
    }

    tracing::info!("Initializing LLM provider: {}...", config.llm.model);
    let llm = LlmProvider::new(&config.llm);
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - the assistant will answer with a failure notice");
    } else if config.llm.api_key.is_none()
        && matches!(llm.backend(), LlmBackend::OpenAI | LlmBackend::OpenRouter)
    {
        tracing::warn!("LLM_API_KEY is not set - hosted providers will reject questions");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store, llm);
    let app = create_router(state);

    tracing::info!("Journey starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
