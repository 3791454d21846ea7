use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use tracing::{debug, info};

use super::{CacheError, VideoCache, VideoRecord, record_key};

/// Redis rejects `EX 0` and expiries that overflow its millisecond clock.
const MAX_EXPIRY_SECS: u64 = i64::MAX as u64 / 1000 / 2;

fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().clamp(1, MAX_EXPIRY_SECS)
}

#[derive(Clone)]
pub struct RedisVideoCache {
    client: Client,
}

impl RedisVideoCache {
    pub async fn connect(connection_string: &str) -> Result<Self, CacheError> {
        let client = Client::open(connection_string)?;

        // Fail at startup rather than on the first poll
        let _conn = client.get_multiplexed_async_connection().await?;

        info!("✅ Connected to Redis");
        Ok(Self { client })
    }

    async fn conn(&self) -> Result<MultiplexedConnection, CacheError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl VideoCache for RedisVideoCache {
    async fn get(&self, job_id: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn().await?;
        let url: Option<String> = conn.get(record_key(job_id)).await?;
        Ok(url)
    }

    async fn put(&self, record: &VideoRecord, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let seconds = expiry_seconds(ttl);
        let _: () = conn
            .set_ex(record_key(record.job_id()), record.download_url(), seconds)
            .await?;

        debug!(job_id = %record.job_id(), ttl_secs = seconds, "Video record cached in Redis");
        Ok(())
    }
}
