//! Crawl engine - breadth-first traversal of a single site
//!
//! This module contains the crawl loop that:
//! - Manages the FIFO frontier, the attempted set and the pending set
//! - Restricts link-following to the seed's network location
//! - Coordinates fetching and link extraction
//! - Publishes progress to the session store after every step

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{resolve_link, LinkExtractor};
use crate::crawler::progress::SessionWriter;
use crate::output::CrawlLog;
use crate::state::{CrawlOutcome, SessionKey};
use crate::storage::SessionStore;
use crate::url::{is_excluded, network_location_of, normalize_url};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Limits applied to every crawl run
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Timeout for each page fetch
    pub request_timeout: Duration,

    /// Stop once this many pages have been found
    pub max_pages: Option<usize>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from(&CrawlerConfig::default())
    }
}

impl From<&CrawlerConfig> for CrawlSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            max_pages: config.max_pages,
        }
    }
}

/// Breadth-first, single-site crawl engine
///
/// The engine is cheap to clone; every collaborator is shared.
#[derive(Clone)]
pub struct CrawlEngine {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    store: Arc<dyn SessionStore>,
    log: Arc<dyn CrawlLog>,
    settings: CrawlSettings,
}

impl CrawlEngine {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        store: Arc<dyn SessionStore>,
        log: Arc<dyn CrawlLog>,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            store,
            log,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Runs a complete crawl for one session
    ///
    /// 1. Reset the session to running
    /// 2. Pop the frontier head, normalize it, skip if already attempted or excluded
    /// 3. Publish it as the current URL and fetch the original string
    /// 4. On an HTML 200, record the page and enqueue unseen same-site links
    /// 5. When the frontier is empty, store the sorted results as done
    ///
    /// Fetch failures and non-HTML responses only drop the URL at hand; it is
    /// not requested again when later pages link to it.
    /// Cancellation and the optional page cap end the run early with the
    /// pages found so far.
    ///
    /// # Arguments
    ///
    /// * `key` - Session the run reports into
    /// * `run_id` - Generation of this run; writes are dropped once a newer run owns the session
    /// * `start_url` - Seed URL; its network location is the crawl scope
    /// * `cancel` - Token that stops the run between or during fetches
    pub async fn run(
        &self,
        key: &SessionKey,
        run_id: u64,
        start_url: &str,
        cancel: CancellationToken,
    ) -> CrawlOutcome {
        let writer = SessionWriter::new(Arc::clone(&self.store), key.clone(), run_id);
        if !writer.begin(start_url) {
            tracing::debug!("Run {} for session {} superseded before start", run_id, key);
            return CrawlOutcome::Cancelled;
        }

        tracing::info!("Starting crawl of {} (session {})", start_url, key);
        self.log
            .record(&format!("Crawl gestartet für Domain: {}", start_url));

        let (found_paths, outcome) = self.traverse(&writer, start_url, &cancel).await;

        tracing::info!(
            "Crawl of {} finished ({}): {} pages found",
            start_url,
            outcome,
            found_paths.len()
        );

        let mut results = found_paths;
        results.sort();
        results.dedup();

        self.log.record(&format!(
            "Crawl beendet für {} – Gefundene Seiten: {}",
            start_url,
            results.len()
        ));
        for page in &results {
            self.log.record(&format!("  - {}", page));
        }

        writer.finish(results, outcome);
        outcome
    }

    /// The BFS loop; returns the found pages in discovery order
    async fn traverse(
        &self,
        writer: &SessionWriter,
        start_url: &str,
        cancel: &CancellationToken,
    ) -> (Vec<String>, CrawlOutcome) {
        let base_domain = network_location_of(start_url);

        let mut frontier = VecDeque::from([start_url.to_string()]);
        let mut pending: HashSet<String> = HashSet::from([normalize_url(start_url, true)]);
        let mut attempted: HashSet<String> = HashSet::new();
        let mut found_paths: Vec<String> = Vec::new();

        let outcome = loop {
            if cancel.is_cancelled() {
                break CrawlOutcome::Cancelled;
            }

            let Some(url) = frontier.pop_front() else {
                break CrawlOutcome::Completed;
            };

            let clean_url = normalize_url(&url, true);
            pending.remove(&clean_url);
            if attempted.contains(&clean_url) || is_excluded(&clean_url) {
                continue;
            }

            // Every URL gets one request per crawl, whatever the response
            attempted.insert(clean_url.clone());
            writer.set_current_url(&clean_url);

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break CrawlOutcome::Cancelled,
                result = self.fetcher.get(&url, self.settings.request_timeout) => result,
            };

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            if !page.is_html() {
                tracing::debug!(
                    "Skipping {}: HTTP {} ({})",
                    url,
                    page.status_code,
                    page.content_type.as_deref().unwrap_or("no content type")
                );
                continue;
            }

            found_paths.push(clean_url.clone());
            writer.set_found_count(found_paths.len());
            tracing::debug!("Found page {}: {}", found_paths.len(), clean_url);

            if let (Some(base_domain), Ok(page_url)) = (base_domain.as_deref(), Url::parse(&url)) {
                for href in self.extractor.extract_hyperlinks(&page.body) {
                    let Some(absolute) = resolve_link(&href, &page_url) else {
                        continue;
                    };
                    let link = normalize_url(&absolute, true);

                    if network_location_of(&link).as_deref() == Some(base_domain)
                        && !attempted.contains(&link)
                        && !pending.contains(&link)
                        && !is_excluded(&link)
                    {
                        pending.insert(link.clone());
                        frontier.push_back(link);
                    }
                }
            }

            // Only a cap that leaves queued work behind truncates the crawl
            if self
                .settings
                .max_pages
                .is_some_and(|max_pages| found_paths.len() >= max_pages)
            {
                if frontier.is_empty() {
                    break CrawlOutcome::Completed;
                }
                tracing::info!("Page cap of {} reached", found_paths.len());
                break CrawlOutcome::PageCapReached;
            }
        };

        (found_paths, outcome)
    }
}
