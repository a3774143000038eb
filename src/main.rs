use dungeon_scribe::{
    config::{run_env, Config},
    create_app,
    llm::OpenAiClient,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let env = run_env();
    let config: Config = Config::load().expect("Failed to load config.");

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!(run_env = %env, "Starting Dungeon Scribe server...");

    let generator = OpenAiClient::new(&config.llm).expect("Failed to build text generation client.");
    tracing::info!(model = %generator.model(), "Text generation client ready");
    let app = create_app(Arc::new(generator));
    tracing::info!("Listening on {}", &config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .expect("Failed to bind server address.");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
    }
}
