//! Storage trait for session backends

use crate::state::{CrawlSession, SessionKey};

/// Trait for session store implementations
///
/// Implementations must be safe to share between crawl tasks and pollers.
/// Every method observes or mutates one session atomically; there is no
/// cross-session transaction.
pub trait SessionStore: Send + Sync {
    /// Returns a snapshot of the session, if it exists
    fn get(&self, key: &SessionKey) -> Option<CrawlSession>;

    /// Inserts or replaces a session
    fn put(&self, key: SessionKey, session: CrawlSession);

    /// Mutates a session in place under the store's synchronization
    ///
    /// Returns false if the session does not exist.
    fn update(&self, key: &SessionKey, apply: &mut dyn FnMut(&mut CrawlSession)) -> bool;

    /// Removes a session, returning its last state
    fn delete(&self, key: &SessionKey) -> Option<CrawlSession>;

    /// Number of sessions currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
