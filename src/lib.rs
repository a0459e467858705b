// Copyright 2026 Imagescout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Imagescout library — polite paginated image collection.
//!
//! Drives repeated page fetches against Unsplash's search endpoint,
//! decodes each page's JSON payload, filters and deduplicates records,
//! and stops on cap, exhaustion, an empty page, an error, or caller
//! cancellation. The binary in `main.rs` is a thin CLI over this crate.

pub mod cli;
pub mod collect;
pub mod download;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod query;
pub mod record;

pub use collect::{
    cancel_channel, CancelHandle, CancelToken, Collection, Collector, CollectorConfig, StopReason,
};
pub use error::FetchError;
pub use fetch::{FetcherConfig, PageFetcher, UserAgentPool};
pub use query::{ColorFilter, Orientation, SearchQuery};
pub use record::ImageRecord;
