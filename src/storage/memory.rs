use crate::state::{CrawlSession, CrawlStatus, SessionKey};
use crate::storage::SessionStore;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory session store backed by a mutex-guarded map
///
/// With a capacity set, inserting a new key into a full store evicts the
/// session that finished longest ago. Running sessions are never evicted, so
/// the store may temporarily exceed its capacity when every slot is busy.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionKey, CrawlSession>>,
    capacity: Option<usize>,
}

impl MemorySessionStore {
    /// Creates an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that keeps at most `capacity` sessions when possible
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionKey, CrawlSession>> {
        // A panicking writer leaves fields individually valid
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Picks the finished session with the oldest finish time
fn eviction_candidate(sessions: &HashMap<SessionKey, CrawlSession>) -> Option<SessionKey> {
    sessions
        .iter()
        .filter(|(_, session)| session.status == CrawlStatus::Done)
        .min_by_key(|(_, session)| session.finished_at)
        .map(|(key, _)| key.clone())
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &SessionKey) -> Option<CrawlSession> {
        self.lock().get(key).cloned()
    }

    fn put(&self, key: SessionKey, session: CrawlSession) {
        let mut sessions = self.lock();

        if let Some(capacity) = self.capacity {
            if !sessions.contains_key(&key) && sessions.len() >= capacity {
                match eviction_candidate(&sessions) {
                    Some(evicted) => {
                        tracing::debug!("Evicting finished session {}", evicted);
                        sessions.remove(&evicted);
                    }
                    None => tracing::debug!(
                        "Session store over capacity ({}), no finished session to evict",
                        capacity
                    ),
                }
            }
        }

        sessions.insert(key, session);
    }

    fn update(&self, key: &SessionKey, apply: &mut dyn FnMut(&mut CrawlSession)) -> bool {
        match self.lock().get_mut(key) {
            Some(session) => {
                apply(session);
                true
            }
            None => false,
        }
    }

    fn delete(&self, key: &SessionKey) -> Option<CrawlSession> {
        self.lock().remove(key)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
