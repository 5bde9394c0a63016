//! Crawl service - the caller-facing surface
//!
//! The service starts crawl runs as spawned tasks, answers status and result
//! queries from the session store, and keeps the task handles so a run can
//! be cancelled or joined.

use crate::config::Config;
use crate::crawler::engine::{CrawlEngine, CrawlSettings};
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::parser::HtmlLinkExtractor;
use crate::crawler::progress::SessionWriter;
use crate::output::{CrawlLog, CrawlReport, FileCrawlLog};
use crate::state::{CrawlOutcome, CrawlSession, SessionKey, StatusSnapshot};
use crate::storage::{MemorySessionStore, SessionStore};
use crate::CrawlError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle of a spawned crawl run
struct RunHandle {
    run_id: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Handles of the runs that have not finished yet
type RunMap = Arc<Mutex<HashMap<SessionKey, RunHandle>>>;

/// Starts crawls and answers queries about them
pub struct CrawlService {
    engine: CrawlEngine,
    runs: RunMap,
    next_run_id: AtomicU64,
}

impl CrawlService {
    pub fn new(engine: CrawlEngine) -> Self {
        Self {
            engine,
            runs: Arc::new(Mutex::new(HashMap::new())),
            next_run_id: AtomicU64::new(0),
        }
    }

    /// Builds a service with the HTTP fetcher, the HTML link extractor, an
    /// in-memory session store and a file-backed crawl log
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let log: Arc<dyn CrawlLog> = Arc::new(FileCrawlLog::new(&config.output.log_path));
        Self::from_config_with_log(config, log)
    }

    /// Like [`CrawlService::from_config`], with a caller-provided crawl log
    pub fn from_config_with_log(
        config: &Config,
        log: Arc<dyn CrawlLog>,
    ) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent)?;
        let store: Arc<dyn SessionStore> = match config.sessions.max_sessions {
            Some(capacity) => Arc::new(MemorySessionStore::with_capacity(capacity)),
            None => Arc::new(MemorySessionStore::new()),
        };

        let engine = CrawlEngine::new(
            Arc::new(fetcher),
            Arc::new(HtmlLinkExtractor),
            store,
            log,
            CrawlSettings::from(&config.crawler),
        );

        Ok(Self::new(engine))
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.engine.store()
    }

    /// Starts a crawl of `domain` and returns the session key to poll
    ///
    /// A missing key is generated. Starting a key that is already running
    /// cancels the previous run and reuses the slot. Must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// * `CrawlError::InvalidInput` - `domain` is empty or blank
    pub fn start_crawl(
        &self,
        domain: &str,
        session: Option<SessionKey>,
    ) -> Result<SessionKey, CrawlError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(CrawlError::InvalidInput(
                "domain must not be empty".to_string(),
            ));
        }

        let key = session.unwrap_or_else(SessionKey::generate);
        let run_id = self.next_run_id.fetch_add(1, Ordering::SeqCst) + 1;

        // The slot shows `running` before the task is scheduled
        self.store()
            .put(key.clone(), CrawlSession::start(run_id, domain));

        // Held until the handle is stored, so a fast run cannot finish and
        // deregister before it is registered
        let mut runs = self.runs();
        let cancel = CancellationToken::new();
        let task = spawn_guarded(
            self.engine.clone(),
            Arc::clone(&self.runs),
            key.clone(),
            run_id,
            domain.to_string(),
            cancel.clone(),
        );

        let previous = runs.insert(
            key.clone(),
            RunHandle {
                run_id,
                cancel,
                task,
            },
        );
        drop(runs);
        if let Some(previous) = previous {
            tracing::info!(
                "Session {} restarted, cancelling run {}",
                key,
                previous.run_id
            );
            previous.cancel.cancel();
        }

        tracing::info!("Crawl of {} started (session {}, run {})", domain, key, run_id);
        Ok(key)
    }

    /// Returns live progress; unknown sessions report `idle`
    pub fn status(&self, key: &SessionKey) -> StatusSnapshot {
        self.store()
            .get(key)
            .map(|session| session.snapshot())
            .unwrap_or_default()
    }

    /// Returns the URL list and package once the session is done
    pub fn results(&self, key: &SessionKey) -> Option<CrawlReport> {
        self.store()
            .get(key)
            .as_ref()
            .and_then(CrawlReport::from_session)
    }

    /// Requests cancellation of the session's current run
    ///
    /// Returns false if the key has no unfinished run.
    pub fn cancel(&self, key: &SessionKey) -> bool {
        match self.runs().get(key) {
            Some(run) => {
                run.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Waits for the session's current run to finish
    ///
    /// Returns false if there was no run to wait for.
    pub async fn join(&self, key: &SessionKey) -> bool {
        let run = self.runs().remove(key);
        match run {
            Some(run) => {
                if let Err(e) = run.task.await {
                    tracing::error!("Crawl task for session {} failed: {}", key, e);
                }
                true
            }
            None => false,
        }
    }

    fn runs(&self) -> MutexGuard<'_, HashMap<SessionKey, RunHandle>> {
        lock_runs(&self.runs)
    }
}

fn lock_runs(
    runs: &Mutex<HashMap<SessionKey, RunHandle>>,
) -> MutexGuard<'_, HashMap<SessionKey, RunHandle>> {
    runs.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Spawns a run inside a failure boundary
///
/// The engine runs in its own task; if that task panics, the session is
/// still moved to `done` with outcome `Aborted`. When the run ends it removes
/// its own handle, unless a restart has already replaced it.
fn spawn_guarded(
    engine: CrawlEngine,
    runs: RunMap,
    key: SessionKey,
    run_id: u64,
    start_url: String,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let writer = SessionWriter::new(Arc::clone(engine.store()), key.clone(), run_id);

        let inner_key = key.clone();
        let inner = tokio::spawn(async move {
            engine.run(&inner_key, run_id, &start_url, cancel).await
        });

        if let Err(e) = inner.await {
            tracing::error!("Crawl run {} for session {} aborted: {}", run_id, key, e);
            writer.finish(Vec::new(), CrawlOutcome::Aborted);
        }

        let mut runs = lock_runs(&runs);
        if runs.get(&key).is_some_and(|run| run.run_id == run_id) {
            runs.remove(&key);
        }
    })
}
