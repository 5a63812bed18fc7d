//! File-backed feed store
//!
//! Persists the aggregate as a single JSON file. Mutations are funneled
//! through one writer task that owns the file and applies them in the order
//! they were submitted. Inserts write a sibling temp file and rename it into
//! place, so readers that open the file directly see either the previous
//! aggregate or the new one, never a partial write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

use super::store::{CachedFeed, FeedStore, LocalFeedImage, StoreError};

/// File name used inside the default cache directory
const STORE_FILE_NAME: &str = "feed-store.json";

/// Capacity of the writer's command queue
const COMMAND_QUEUE_SIZE: usize = 32;

type Reply = oneshot::Sender<Result<(), StoreError>>;

/// Mutations handled by the writer task
enum Command {
    Insert { cache: CachedFeed, reply: Reply },
    Delete { reply: Reply },
}

/// Feed store that persists the aggregate to a JSON file on disk
///
/// Cloning the store yields another handle onto the same writer task.
/// Must be created from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct FileFeedStore {
    path: PathBuf,
    commands: mpsc::Sender<Command>,
}

impl FileFeedStore {
    /// Creates a store backed by the file at `path` and starts its writer task
    ///
    /// The file and its parent directories are created on first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (commands, receiver) = mpsc::channel(COMMAND_QUEUE_SIZE);

        tokio::spawn(run_writer(path.clone(), receiver));
        debug!(path = %path.display(), "Started feed store writer");

        Self { path, commands }
    }

    /// Returns the XDG-compliant default location of the store file
    ///
    /// Uses `~/.cache/feedcache/feed-store.json` on Linux. Returns `None` if
    /// no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "feedcache")?;
        Some(project_dirs.cache_dir().join(STORE_FILE_NAME))
    }

    /// The file this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn submit(&self, make: impl FnOnce(Reply) -> Command) -> Result<(), StoreError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| StoreError::WriterClosed)?;
        response.await.map_err(|_| StoreError::WriterClosed)?
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        self.submit(|reply| Command::Delete { reply }).await
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let cache = CachedFeed { feed, timestamp };
        self.submit(|reply| Command::Insert { cache, reply }).await
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let cache: CachedFeed = serde_json::from_slice(&bytes)?;
        Ok(Some(cache))
    }
}

/// Applies queued mutations one at a time until every handle is dropped
async fn run_writer(path: PathBuf, mut commands: mpsc::Receiver<Command>) {
    while let Some(command) = commands.recv().await {
        let (result, reply) = match command {
            Command::Insert { cache, reply } => (write_atomically(&path, &cache).await, reply),
            Command::Delete { reply } => (remove(&path).await, reply),
        };

        if let Err(ref e) = result {
            warn!(path = %path.display(), error = %e, "Feed store mutation failed");
        }

        // The caller may have stopped waiting; the mutation is applied either way.
        let _ = reply.send(result);
    }

    debug!(path = %path.display(), "Feed store writer stopped");
}

async fn write_atomically(path: &Path, cache: &CachedFeed) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(cache)?;
    // One staging file per write, so stores sharing a path never collide
    let staging = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

    let staged = async {
        let mut file = fs::File::create(&staging).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        fs::rename(&staging, path).await
    }
    .await;

    if let Err(e) = staged {
        let _ = fs::remove_file(&staging).await;
        return Err(e.into());
    }

    debug!(path = %path.display(), count = cache.feed.len(), "Wrote cached feed");
    Ok(())
}

async fn remove(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Deleted cached feed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
