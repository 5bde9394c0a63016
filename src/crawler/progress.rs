//! Session writer used by a single crawl run
//!
//! Every write checks the run generation stored in the session, so a run
//! that has been superseded by a restart of the same key can no longer touch
//! the slot.

use crate::state::{CrawlOutcome, CrawlSession, SessionKey};
use crate::storage::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct SessionWriter {
    store: Arc<dyn SessionStore>,
    key: SessionKey,
    run_id: u64,
}

impl SessionWriter {
    pub(crate) fn new(store: Arc<dyn SessionStore>, key: SessionKey, run_id: u64) -> Self {
        Self { store, key, run_id }
    }

    /// Resets the slot to a fresh running state for this run
    ///
    /// Returns false if a newer run already owns the slot.
    pub(crate) fn begin(&self, seed: &str) -> bool {
        let mut owned = true;
        let existed = self.store.update(&self.key, &mut |session| {
            if session.run_id > self.run_id {
                owned = false;
            } else {
                *session = CrawlSession::start(self.run_id, seed);
            }
        });

        if !existed {
            self.store
                .put(self.key.clone(), CrawlSession::start(self.run_id, seed));
        }

        owned
    }

    pub(crate) fn set_current_url(&self, url: &str) {
        self.apply(|session| {
            session.current_url.clear();
            session.current_url.push_str(url);
        });
    }

    pub(crate) fn set_found_count(&self, found_count: usize) {
        self.apply(|session| session.found_count = found_count);
    }

    pub(crate) fn finish(&self, pages: Vec<String>, outcome: CrawlOutcome) {
        let mut pages = Some(pages);
        self.apply(|session| {
            session.finish(pages.take().unwrap_or_default(), outcome);
        });
    }

    fn apply(&self, mut change: impl FnMut(&mut CrawlSession)) {
        let run_id = self.run_id;
        self.store.update(&self.key, &mut |session| {
            if session.run_id == run_id {
                change(session);
            }
        });
    }
}
