use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bizflow_api::{
    api::{create_router, AppState},
    config::Config,
    db::{self, Cache, CacheWriterHandle, PgTemplateStore},
    services::{
        providers::{GeminiClient, LlmClient, OfflineClient},
        ConsultationService, ContentGenerator, RecommendationEngine,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let client: Arc<dyn LlmClient> = match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiClient::new(
            key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.llm_timeout(),
        )?),
        None => {
            tracing::warn!("GEMINI_API_KEY not set, using offline text generation");
            Arc::new(OfflineClient::new())
        }
    };
    tracing::info!(provider = client.name(), "Text generation provider ready");

    let mut generator = ContentGenerator::new(client);
    let mut cache_writer: Option<CacheWriterHandle> = None;
    if let Some(redis_url) = &config.redis_url {
        let redis = db::create_redis_client(redis_url).context("invalid REDIS_URL")?;
        let (cache, handle) = Cache::new(redis);
        generator = generator.with_cache(cache, config.reasoning_cache_ttl);
        cache_writer = Some(handle);
        tracing::info!("Reasoning cache enabled");
    }

    let mut consultation =
        ConsultationService::new(Arc::new(RecommendationEngine::default()), generator);
    if let Some(database_url) = &config.database_url {
        let pool = db::create_pool(database_url)
            .await
            .context("failed to connect to Postgres")?;
        let store = PgTemplateStore::new(pool);
        store.migrate().await.context("failed to run migrations")?;
        consultation = consultation.with_store(Arc::new(store));
        tracing::info!("Template and history store enabled");
    }

    let app = create_router(AppState::new(consultation));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
