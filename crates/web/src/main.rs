use tracing_subscriber::EnvFilter;
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = WebConfig::from_env().expect("invalid configuration in env.");
    tracing::info!(?config, "starting numbering service");

    if let Err(why) = start_web_server(WebState::new(config)).await {
        tracing::error!("web server stopped: {}", why);
    }
}
