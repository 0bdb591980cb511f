use std::{fmt::Display, future::Future, time::Duration};

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Builds the shared pool and blocks until postgres answers, or gives up after the
/// configured number of attempts.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_lazy_with(config.database.clone());

    let probe_pool = &pool;
    wait_for_storage(config.connect_attempts, config.connect_backoff, || async move {
        sqlx::query("SELECT 1").execute(probe_pool).await.map(|_| ())
    })
    .await
    .with_context(|| format!("database unreachable after {} attempts", config.connect_attempts.max(1)))?;

    Ok(pool)
}

pub async fn wait_for_storage<F, Fut, E>(attempts: u32, backoff: Duration, mut probe: F) -> Result<(), E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match probe().await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts => {
                tracing::warn!("waiting for database ({}/{}): {}", attempt, attempts, e);
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
