// Copyright 2026 Imagescout Contributors
// SPDX-License-Identifier: Apache-2.0

//! The pagination state machine.
//!
//! Drives sequential page fetches, deduplicates and filters candidates,
//! and stops on one of five terminal conditions: result cap reached,
//! results exhausted, empty page, fetch error, or caller cancellation.
//! A run never fails outright: errors degrade to "stop and return what
//! was gathered", with the cause reported as a warning.

use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::progress::{self, CollectEventKind, ProgressSender};
use crate::query::SearchQuery;
use crate::record::ImageRecord;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

/// Why a collection run stopped. All variants are terminal.
#[derive(Debug)]
pub enum StopReason {
    /// The accumulated count reached the query's `max_results`.
    Cap,
    /// A fetched page contributed zero previously-unseen qualifying records.
    Exhausted,
    /// A fetched page had an empty (or absent) results list.
    EmptyPage,
    /// A page fetch failed; the run kept everything gathered before it.
    Error(FetchError),
    /// The caller cancelled the run.
    Cancelled,
}

impl StopReason {
    /// Short machine-readable label, used by the CLI's JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cap => "cap",
            Self::Exhausted => "exhausted",
            Self::EmptyPage => "empty_page",
            Self::Error(_) => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

/// The outcome of one collection run.
#[derive(Debug)]
pub struct Collection {
    /// Accepted records in first-seen order, at most `max_results` of them.
    pub records: Vec<ImageRecord>,
    /// The terminal condition that ended the run.
    pub stop: StopReason,
    /// Number of pages successfully fetched and decoded.
    pub pages_fetched: u32,
    /// Human-readable diagnostic when the run ended early (error or
    /// cancellation). `None` for the ordinary stop conditions.
    pub warning: Option<String>,
}

/// Collector configuration.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Pause between successive page fetches. Zero in tests.
    pub page_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(500),
        }
    }
}

/// Caller-side handle that cancels a running collection.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the run. Idempotent; a no-op once the token side is gone.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Collector-side cancellation token paired with a [`CancelHandle`].
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Whether the handle has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the handle fires. Pends forever if the handle was
    /// dropped without cancelling, so a run without a caller handle just
    /// never observes cancellation.
    pub async fn cancelled(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Create a linked cancellation pair for one collection run.
pub fn cancel_channel() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Transient per-run state. Created when a run starts, dropped when it
/// returns; nothing is shared between runs.
struct CollectionState {
    /// Next page to fetch, 1-based, incremented by exactly 1 per page.
    page: u32,
    /// Every id encountered, accepted or not. Superset of the accepted ids:
    /// a dimension-filtered id is still marked seen so an overlapping page
    /// never re-evaluates it.
    seen: HashSet<String>,
    /// Accepted records in discovery order.
    records: Vec<ImageRecord>,
    pages_fetched: u32,
}

impl CollectionState {
    fn new() -> Self {
        Self {
            page: 1,
            seen: HashSet::new(),
            records: Vec::new(),
            pages_fetched: 0,
        }
    }
}

/// Owns the pagination loop. One instance can serve many runs; each run
/// carries its own [`CollectionState`], so concurrent runs need no
/// synchronization.
#[derive(Debug)]
pub struct Collector {
    fetcher: PageFetcher,
    config: CollectorConfig,
    progress: Option<ProgressSender>,
}

impl Collector {
    pub fn new(fetcher: PageFetcher, config: CollectorConfig) -> Self {
        Self {
            fetcher,
            config,
            progress: None,
        }
    }

    /// Attach a progress channel. Events are dropped when nobody listens.
    pub fn with_progress(mut self, sender: ProgressSender) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Run a collection to completion without external cancellation.
    pub async fn collect(&self, query: &SearchQuery) -> Collection {
        let (_handle, token) = cancel_channel();
        self.collect_with_cancel(query, token).await
    }

    /// Run a collection that the paired [`CancelHandle`] may abort. An
    /// abort interrupts the in-flight fetch or the politeness pause and
    /// returns everything accepted so far.
    pub async fn collect_with_cancel(
        &self,
        query: &SearchQuery,
        mut cancel: CancelToken,
    ) -> Collection {
        let cap = query.max_results.max(1);
        let mut state = CollectionState::new();
        let mut seq = 0u64;

        info!(term = %query.term, cap, "starting collection run");

        loop {
            let fetched = tokio::select! {
                result = self.fetcher.fetch_page(query, state.page) => result,
                _ = cancel.cancelled() => {
                    return self.finish(state, cap, &mut seq, StopReason::Cancelled,
                        Some("collection cancelled; returning records gathered so far".to_string()));
                }
            };

            let page = match fetched {
                Ok(page) => page,
                Err(err) => {
                    warn!(page = state.page, %err, "page fetch failed, halting run");
                    let detail = format!("page {} fetch failed: {err}", state.page);
                    return self.finish(state, cap, &mut seq, StopReason::Error(err), Some(detail));
                }
            };
            state.pages_fetched += 1;

            if page.results.is_empty() {
                return self.finish(state, cap, &mut seq, StopReason::EmptyPage, None);
            }

            let mut new_this_page = 0usize;
            for candidate in &page.results {
                let record = match ImageRecord::from_candidate(candidate) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!(page = state.page, %err, "skipping malformed candidate");
                        progress::emit(
                            &self.progress,
                            &mut seq,
                            CollectEventKind::Warning {
                                message: format!("skipped malformed candidate: {err}"),
                            },
                        );
                        continue;
                    }
                };

                // Seen beats accepted: an id is recorded even when the
                // dimension filter rejects it, so overlapping pages never
                // re-evaluate it or re-count it toward exhaustion.
                if !state.seen.insert(record.id.clone()) {
                    continue;
                }
                if record.width < query.min_width || record.height < query.min_height {
                    continue;
                }

                state.records.push(record);
                new_this_page += 1;
                if state.records.len() >= cap {
                    // Strict early exit: later candidates on this page are
                    // never evaluated.
                    progress::emit(
                        &self.progress,
                        &mut seq,
                        CollectEventKind::PageProcessed {
                            page: state.page,
                            candidates: page.results.len(),
                            accepted_this_page: new_this_page,
                            accepted_total: state.records.len(),
                            target: cap,
                        },
                    );
                    return self.finish(state, cap, &mut seq, StopReason::Cap, None);
                }
            }

            progress::emit(
                &self.progress,
                &mut seq,
                CollectEventKind::PageProcessed {
                    page: state.page,
                    candidates: page.results.len(),
                    accepted_this_page: new_this_page,
                    accepted_total: state.records.len(),
                    target: cap,
                },
            );

            if new_this_page == 0 {
                return self.finish(state, cap, &mut seq, StopReason::Exhausted, None);
            }

            state.page += 1;

            // Politeness pause before the next fetch.
            tokio::select! {
                _ = sleep(self.config.page_delay) => {}
                _ = cancel.cancelled() => {
                    return self.finish(state, cap, &mut seq, StopReason::Cancelled,
                        Some("collection cancelled; returning records gathered so far".to_string()));
                }
            }
        }
    }

    fn finish(
        &self,
        mut state: CollectionState,
        cap: usize,
        seq: &mut u64,
        stop: StopReason,
        warning: Option<String>,
    ) -> Collection {
        // Should already hold by construction.
        state.records.truncate(cap);

        info!(
            accepted = state.records.len(),
            pages = state.pages_fetched,
            stop = ?stop,
            "collection run finished"
        );
        progress::emit(
            &self.progress,
            seq,
            CollectEventKind::Finished {
                accepted_total: state.records.len(),
                pages_fetched: state.pages_fetched,
            },
        );

        Collection {
            records: state.records,
            stop,
            pages_fetched: state.pages_fetched,
            warning,
        }
    }
}
