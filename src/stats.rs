#![cfg(feature = "std")]

use std::collections::HashMap;
use std::io::ErrorKind;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use crate::store::{write_atomic, FileStore};

/// Per-user results of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub wins: u32,
    pub losses: u32,
    pub total_games: u32,
}

impl Stats {
    fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.total_games += 1;
    }
}

/// Receives the result of every finished game.
#[async_trait::async_trait]
pub trait StatsSink: Send + Sync {
    /// Count one finished game for `user_id`. Every call adds one game.
    async fn record_result(&self, user_id: &str, won: bool) -> anyhow::Result<()>;
    /// Current totals; all zero for unknown users.
    async fn stats(&self, user_id: &str) -> anyhow::Result<Stats>;
}

#[derive(Default)]
pub struct MemoryStats {
    by_user: Mutex<HashMap<String, Stats>>,
}

impl MemoryStats {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StatsSink for MemoryStats {
    async fn record_result(&self, user_id: &str, won: bool) -> anyhow::Result<()> {
        self.by_user
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .record(won);
        Ok(())
    }

    async fn stats(&self, user_id: &str) -> anyhow::Result<Stats> {
        Ok(self
            .by_user
            .lock()
            .await
            .get(user_id)
            .copied()
            .unwrap_or_default())
    }
}

impl FileStore {
    async fn read_stats(&self) -> anyhow::Result<HashMap<String, Stats>> {
        let path = self.stats_path();
        match fs::read(&path).await {
            Ok(bytes) => bincode::deserialize(&bytes)
                .with_context(|| format!("corrupt statistics file {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

#[async_trait::async_trait]
impl StatsSink for FileStore {
    async fn record_result(&self, user_id: &str, won: bool) -> anyhow::Result<()> {
        let _guard = self.stats_lock.lock().await;
        let mut all = self.read_stats().await?;
        all.entry(user_id.to_string()).or_default().record(won);
        let bytes = bincode::serialize(&all).context("failed to encode statistics")?;
        write_atomic(&self.stats_path(), &bytes).await
    }

    async fn stats(&self, user_id: &str) -> anyhow::Result<Stats> {
        let _guard = self.stats_lock.lock().await;
        Ok(self.read_stats().await?.get(user_id).copied().unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl<S: StatsSink + ?Sized> StatsSink for std::sync::Arc<S> {
    async fn record_result(&self, user_id: &str, won: bool) -> anyhow::Result<()> {
        (**self).record_result(user_id, won).await
    }

    async fn stats(&self, user_id: &str) -> anyhow::Result<Stats> {
        (**self).stats(user_id).await
    }
}
