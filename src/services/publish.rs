//! Pub/sub event publisher for background workers.
//!
//! DESIGN
//! ======
//! Registering a paper or an RSS feed hands the heavy lifting (fetching,
//! analysis) to an external worker over a Redis channel. Delivery is
//! best-effort by contract: the row is already committed when the publish
//! happens, and a publish failure must not roll it back or fail the action.
//! `AppState::publish_best_effort` owns the swallow-and-log policy; this
//! module only reports errors.

use redis::aio::ConnectionManager;

pub const PAPER_ANALYSIS_CHANNEL: &str = "paper:analysis";
pub const RSS_UPDATE_CHANNEL: &str = "rss:update_feeds";

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Fire-and-forget JSON message publisher.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a JSON payload to a named channel.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] if the broker rejects the message or is
    /// unreachable.
    async fn publish(&self, channel: &str, payload: serde_json::Value) -> Result<(), PublishError>;
}

/// Redis-backed publisher over a multiplexed connection manager.
pub struct RedisPublisher {
    conn: ConnectionManager,
}

impl RedisPublisher {
    /// Connect to Redis and build the shared connection manager.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] if the URL is invalid or the initial
    /// connection fails.
    pub async fn connect(redis_url: &str) -> Result<Self, PublishError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

#[async_trait::async_trait]
impl EventPublisher for RedisPublisher {
    async fn publish(&self, channel: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        // The manager is a cheap handle over one multiplexed connection.
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("PUBLISH")
            .arg(channel)
            .arg(payload.to_string())
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "publish_test.rs"]
mod tests;
