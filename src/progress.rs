// Copyright 2026 Imagescout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for collection runs.
//!
//! The collector emits `CollectEvent`s as pages come in, which flow through
//! a `tokio::sync::broadcast` channel to any subscriber (the CLI progress
//! bar, a log sink). When no subscriber exists, events are silently dropped.

use serde::{Deserialize, Serialize};

/// A progress event emitted during a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectEvent {
    /// Monotonically increasing sequence number within one run.
    pub seq: u64,
    /// The kind of progress event.
    pub event: CollectEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollectEventKind {
    /// One page was fetched and its candidates processed.
    PageProcessed {
        page: u32,
        candidates: usize,
        accepted_this_page: usize,
        accepted_total: usize,
        target: usize,
    },
    /// A non-fatal warning occurred (e.g. one malformed candidate skipped).
    Warning { message: String },
    /// The run finished.
    Finished {
        accepted_total: usize,
        pages_fetched: u32,
    },
}

/// Sender handle for emitting collection progress.
pub type ProgressSender = tokio::sync::broadcast::Sender<CollectEvent>;

/// Receiver handle for consuming collection progress.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<CollectEvent>;

/// Create a progress broadcast channel with a bounded buffer.
///
/// 64 events cover typical runs (a handful of page events plus the
/// occasional warning).
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(64)
}

/// Emit a progress event, silently ignoring send errors (which occur when
/// no receivers are listening).
pub fn emit(tx: &Option<ProgressSender>, seq: &mut u64, event: CollectEventKind) {
    if let Some(ref sender) = tx {
        *seq += 1;
        let _ = sender.send(CollectEvent { seq: *seq, event });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = CollectEvent {
            seq: 3,
            event: CollectEventKind::PageProcessed {
                page: 2,
                candidates: 20,
                accepted_this_page: 15,
                accepted_total: 35,
                target: 50,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("PageProcessed"));

        let parsed: CollectEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.seq, 3);
    }

    #[test]
    fn test_channel_no_receivers() {
        let (tx, rx) = channel();
        drop(rx); // No receivers
        emit(
            &Some(tx),
            &mut 0,
            CollectEventKind::Warning {
                message: "test".to_string(),
            },
        );
    }

    #[test]
    fn test_emit_none_sender() {
        // Should be a no-op
        emit(
            &None,
            &mut 0,
            CollectEventKind::Finished {
                accepted_total: 0,
                pages_fetched: 0,
            },
        );
    }
}
