//! On-demand retrieval of a record's resolution variants.
//!
//! Collection never touches image bytes; this module is the downstream
//! contract for callers that want them afterwards, one variant at a time.

use crate::fetch::UserAgentPool;
use crate::record::ImageRecord;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Which resolution variant of a record to retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    Regular,
    Full,
    Raw,
}

impl Variant {
    /// The record's URL for this variant.
    pub fn url<'a>(&self, record: &'a ImageRecord) -> &'a str {
        match self {
            Self::Regular => &record.regular_url,
            Self::Full => &record.full_url,
            Self::Raw => &record.raw_url,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Full => "full",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Downloads image bytes for individual records.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    agents: UserAgentPool,
}

impl Downloader {
    /// Build a downloader. Image bodies are bigger than search pages, so
    /// the timeout is more generous than the fetcher's.
    pub fn new(timeout: Duration, agents: UserAgentPool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client, agents }
    }

    pub fn with_defaults() -> Self {
        Self::new(Duration::from_secs(60), UserAgentPool::default())
    }

    /// Fetch one variant of `record` into `dest_dir` as `<id>_<variant>.jpg`.
    /// Returns the written path.
    pub async fn download(
        &self,
        record: &ImageRecord,
        variant: Variant,
        dest_dir: &Path,
    ) -> Result<PathBuf> {
        let url = variant.url(record);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.agents.sample())
            .send()
            .await
            .with_context(|| format!("requesting {variant} variant of {}", record.id))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{variant} variant of {} answered HTTP {status}", record.id);
        }

        let bytes = response.bytes().await.context("reading image body")?;
        let path = dest_dir.join(format!("{}_{variant}.jpg", record.id));
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        info!(id = %record.id, %variant, bytes = bytes.len(), "downloaded image variant");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ImageRecord {
        ImageRecord {
            id: "xYz987".to_string(),
            regular_url: "https://images.example/xYz987?w=1080".to_string(),
            full_url: "https://images.example/xYz987?q=85".to_string(),
            raw_url: "https://images.example/xYz987".to_string(),
            width: 3200,
            height: 2400,
            alt_text: String::new(),
            color: "#0c2626".to_string(),
            likes: 4,
        }
    }

    #[test]
    fn test_variant_urls() {
        let rec = record();
        assert_eq!(Variant::Regular.url(&rec), rec.regular_url);
        assert_eq!(Variant::Full.url(&rec), rec.full_url);
        assert_eq!(Variant::Raw.url(&rec), rec.raw_url);
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(Variant::Regular.to_string(), "regular");
        assert_eq!(Variant::Raw.to_string(), "raw");
    }
}
