use std::sync::Arc;

use anyhow::Context;

use keystone_api::config::ServerConfig;
use keystone_api::identity_client::HttpIdentityProvider;
use keystone_auth::AuthConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    keystone_observability::init();

    // Refuses to start without JWT_SECRET unless the insecure fallback was
    // explicitly allowed.
    let auth = AuthConfig::from_env().context("invalid token configuration")?;
    let server = ServerConfig::from_env().context("invalid server configuration")?;

    let identities = HttpIdentityProvider::new(&server.identity_service_url, server.identity_timeout)
        .context("failed to build identity service client")?;

    let app = keystone_api::app::build_app(&auth, Arc::new(identities));

    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        lifetime = %auth.lifetime,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
