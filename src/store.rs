#![cfg(feature = "std")]

//! Game persistence: the store interface and two implementations.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use crate::bot::Difficulty;
use crate::game::GameStatus;

pub type GameId = u64;

/// A stored game: metadata plus the encoded state blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub user_id: String,
    /// Output of [`crate::encode_state`].
    pub state: Vec<u8>,
    pub difficulty: Difficulty,
    /// Mirrors the status inside `state` so active-game lookups need not
    /// decode every blob.
    pub status: GameStatus,
    /// Unix time in milliseconds.
    pub created_at: u64,
    /// Unix time in milliseconds.
    pub updated_at: u64,
}

/// Everything needed to insert a game; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewGameRecord {
    pub user_id: String,
    pub state: Vec<u8>,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub created_at: u64,
}

impl NewGameRecord {
    fn with_id(self, id: GameId) -> GameRecord {
        GameRecord {
            id,
            user_id: self.user_id,
            state: self.state,
            difficulty: self.difficulty,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Key-value persistence for games. Records are written whole.
#[async_trait::async_trait]
pub trait GameStore: Send + Sync {
    /// Store a new game under a fresh id.
    async fn insert(&self, record: NewGameRecord) -> anyhow::Result<GameRecord>;
    async fn load(&self, id: GameId) -> anyhow::Result<Option<GameRecord>>;
    /// Replace the stored record with the same id.
    async fn save(&self, record: &GameRecord) -> anyhow::Result<()>;
    /// Most recently updated game of `user_id` that is not finished.
    async fn find_active_by_user(&self, user_id: &str) -> anyhow::Result<Option<GameRecord>>;
}

fn latest_active<'a>(
    records: impl Iterator<Item = &'a GameRecord>,
    user_id: &str,
) -> Option<&'a GameRecord> {
    records
        .filter(|r| r.user_id == user_id && r.status != GameStatus::Finished)
        .max_by_key(|r| (r.updated_at, r.id))
}

#[derive(Default)]
struct MemoryInner {
    last_id: GameId,
    games: HashMap<GameId, GameRecord>,
}

/// Store keeping every record in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.games.len()
    }
}

#[async_trait::async_trait]
impl GameStore for MemoryStore {
    async fn insert(&self, record: NewGameRecord) -> anyhow::Result<GameRecord> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let record = record.with_id(inner.last_id);
        inner.games.insert(record.id, record.clone());
        Ok(record)
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<GameRecord>> {
        Ok(self.inner.lock().await.games.get(&id).cloned())
    }

    async fn save(&self, record: &GameRecord) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().await;
        match inner.games.get_mut(&record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(anyhow::anyhow!("cannot save unknown game {}", record.id)),
        }
    }

    async fn find_active_by_user(&self, user_id: &str) -> anyhow::Result<Option<GameRecord>> {
        let inner = self.inner.lock().await;
        Ok(latest_active(inner.games.values(), user_id).cloned())
    }
}

const GAMES_DIR: &str = "games";
pub(crate) const STATS_FILE: &str = "stats.bin";

/// Store writing one bincode file per game under `<root>/games/`.
///
/// Writes go to a temporary file that is then renamed over the record, so a
/// reader never sees a half-written game.
pub struct FileStore {
    root: PathBuf,
    last_id: Mutex<GameId>,
    pub(crate) stats_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        let games = root.join(GAMES_DIR);
        fs::create_dir_all(&games)
            .await
            .with_context(|| format!("failed to create {}", games.display()))?;

        let mut last_id = 0;
        for path in list_records(&games).await? {
            if let Some(id) = record_id(&path) {
                last_id = last_id.max(id);
            }
        }
        log::debug!("opened file store at {} (last id {})", root.display(), last_id);
        Ok(Self {
            root,
            last_id: Mutex::new(last_id),
            stats_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn game_path(&self, id: GameId) -> PathBuf {
        self.root.join(GAMES_DIR).join(format!("{}.bin", id))
    }

    pub(crate) fn stats_path(&self) -> PathBuf {
        self.root.join(STATS_FILE)
    }

    async fn write_record(&self, record: &GameRecord) -> anyhow::Result<()> {
        let bytes = bincode::serialize(record).context("failed to encode game record")?;
        write_atomic(&self.game_path(record.id), &bytes).await
    }
}

#[async_trait::async_trait]
impl GameStore for FileStore {
    async fn insert(&self, record: NewGameRecord) -> anyhow::Result<GameRecord> {
        let mut last_id = self.last_id.lock().await;
        let record = record.with_id(*last_id + 1);
        self.write_record(&record).await?;
        *last_id = record.id;
        Ok(record)
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<GameRecord>> {
        read_record(&self.game_path(id)).await
    }

    async fn save(&self, record: &GameRecord) -> anyhow::Result<()> {
        if !fs::try_exists(self.game_path(record.id)).await? {
            anyhow::bail!("cannot save unknown game {}", record.id);
        }
        self.write_record(record).await
    }

    async fn find_active_by_user(&self, user_id: &str) -> anyhow::Result<Option<GameRecord>> {
        let mut records = Vec::new();
        for path in list_records(&self.root.join(GAMES_DIR)).await? {
            if let Some(record) = read_record(&path).await? {
                records.push(record);
            }
        }
        Ok(latest_active(records.iter(), user_id).cloned())
    }
}

fn record_id(path: &Path) -> Option<GameId> {
    if path.extension().and_then(|e| e.to_str()) != Some("bin") {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

async fn list_records(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to list {}", dir.display()))?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if record_id(&path).is_some() {
            paths.push(path);
        }
    }
    Ok(paths)
}

async fn read_record(path: &Path) -> anyhow::Result<Option<GameRecord>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let record = bincode::deserialize(&bytes)
        .with_context(|| format!("corrupt game record {}", path.display()))?;
    Ok(Some(record))
}

pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

#[async_trait::async_trait]
impl<S: GameStore + ?Sized> GameStore for std::sync::Arc<S> {
    async fn insert(&self, record: NewGameRecord) -> anyhow::Result<GameRecord> {
        (**self).insert(record).await
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<GameRecord>> {
        (**self).load(id).await
    }

    async fn save(&self, record: &GameRecord) -> anyhow::Result<()> {
        (**self).save(record).await
    }

    async fn find_active_by_user(&self, user_id: &str) -> anyhow::Result<Option<GameRecord>> {
        (**self).find_active_by_user(user_id).await
    }
}
