use std::env;

use tracing_subscriber::EnvFilter;
use typebeat::error::HubError;
use typebeat::hub::ws::WebsocketHub;

#[tokio::main]
async fn main() -> Result<(), HubError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());

    let mut hub = WebsocketHub::new();
    hub.bind_addr(&addr).await?;
    tracing::info!("duel server listening on ws://{}", addr);

    hub.listen().await
}
