use crate::error::ApiError;
use crate::services::StoredSeparation;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Default maximum number of separations kept in memory
pub const DEFAULT_MAX_ENTRIES: usize = 32;

/// Trait for separation result storage
#[async_trait]
pub trait SeparationStore: Send + Sync {
    /// Store a result, replacing any entry with the same id
    async fn insert(&self, separation: Arc<StoredSeparation>) -> Result<(), ApiError>;

    /// Find a result by content id
    async fn get(&self, id: &str) -> Result<Option<Arc<StoredSeparation>>, ApiError>;
}

struct Entries {
    separations: HashMap<String, Arc<StoredSeparation>>,
    /// Ids by last use, oldest first
    recency: VecDeque<String>,
    max_entries: usize,
}

impl Entries {
    fn touch(&mut self, id: &str) {
        if let Some(pos) = self.recency.iter().position(|k| k == id) {
            if let Some(key) = self.recency.remove(pos) {
                self.recency.push_back(key);
            }
        }
    }
}

/// In-memory separation storage with LRU eviction.
///
/// Holds at most `max_entries` results; inserting past the limit drops the
/// least recently inserted or fetched one.
pub struct InMemoryStore {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Store keeping at most `max_entries` results (at least one).
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries {
                separations: HashMap::new(),
                recency: VecDeque::new(),
                max_entries: max_entries.max(1),
            })),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.separations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.separations.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.entries.read().await.max_entries
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeparationStore for InMemoryStore {
    async fn insert(&self, separation: Arc<StoredSeparation>) -> Result<(), ApiError> {
        let mut entries = self.entries.write().await;
        let id = separation.manifest.id.clone();

        if entries.separations.insert(id.clone(), separation).is_some() {
            tracing::debug!(id = %id, "Replaced stored separation");
            entries.touch(&id);
            return Ok(());
        }
        entries.recency.push_back(id);

        while entries.separations.len() > entries.max_entries {
            let Some(oldest) = entries.recency.pop_front() else {
                break;
            };
            entries.separations.remove(&oldest);
            tracing::debug!(
                id = %oldest,
                stored = entries.separations.len(),
                "Evicted least recently used separation"
            );
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Arc<StoredSeparation>>, ApiError> {
        let mut entries = self.entries.write().await;
        let found = entries.separations.get(id).cloned();
        if found.is_some() {
            entries.touch(id);
        }
        Ok(found)
    }
}
