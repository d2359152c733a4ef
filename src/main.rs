mod db;
mod messages;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::publish::{EventPublisher, RedisPublisher};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let session_secret = std::env::var("SESSION_SECRET").expect("SESSION_SECRET required");
    let session_key = state::session_key_from_secret(&session_secret)
        .expect("SESSION_SECRET must be at least 64 bytes");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Publisher is optional: registrations still succeed without it, the
    // background workers just never hear about them.
    let publisher: Option<Arc<dyn EventPublisher>> = match std::env::var("REDIS_URL") {
        Ok(url) => match RedisPublisher::connect(&url).await {
            Ok(publisher) => {
                tracing::info!("redis publisher connected");
                Some(Arc::new(publisher))
            }
            Err(e) => {
                tracing::warn!(error = %e, "redis unreachable; analysis events disabled");
                None
            }
        },
        Err(_) => {
            tracing::warn!("REDIS_URL not set; analysis events disabled");
            None
        }
    };

    let state = state::AppState::new(pool, publisher, session_key);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "curatify listening");
    axum::serve(listener, app).await.expect("server failed");
}
