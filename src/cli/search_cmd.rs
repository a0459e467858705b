//! `imagescout search <term>` — collect filtered, deduplicated image records.

use crate::cli::output;
use crate::collect::{Collector, CollectorConfig, StopReason};
use crate::download::{Downloader, Variant};
use crate::fetch::{FetcherConfig, PageFetcher, UserAgentPool};
use crate::progress::{self, CollectEventKind, ProgressReceiver};
use crate::query::{ColorFilter, Orientation, SearchQuery};
use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text search term (e.g. "nature")
    pub term: String,

    /// Orientation constraint
    #[arg(long, value_enum, default_value = "any")]
    pub orientation: Orientation,

    /// Dominant-color constraint (e.g. black-and-white, teal)
    #[arg(long, value_enum, default_value = "any")]
    pub color: ColorFilter,

    /// Minimum accepted width in pixels
    #[arg(long, default_value_t = 0)]
    pub min_width: u32,

    /// Minimum accepted height in pixels
    #[arg(long, default_value_t = 0)]
    pub min_height: u32,

    /// Maximum number of records to collect
    #[arg(long = "max", default_value_t = 20)]
    pub max_results: usize,

    /// Pause between page fetches, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Also download this variant of every collected record
    #[arg(long, value_enum)]
    pub download: Option<Variant>,

    /// Directory for downloaded images
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

/// Run the search command.
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.term.trim().is_empty() {
        bail!("search term must be non-empty");
    }
    if args.max_results == 0 {
        bail!("--max must be at least 1");
    }

    let query = SearchQuery::new(args.term.trim())
        .with_orientation(args.orientation)
        .with_color(args.color)
        .with_min_dimensions(args.min_width, args.min_height)
        .with_max_results(args.max_results);

    let fetcher = PageFetcher::new(
        FetcherConfig {
            timeout: Duration::from_secs(args.timeout_secs),
            ..FetcherConfig::default()
        },
        UserAgentPool::default(),
    );
    let config = CollectorConfig {
        page_delay: Duration::from_millis(args.delay_ms),
    };

    let (tx, rx) = progress::channel();
    let collector = Collector::new(fetcher, config).with_progress(tx);

    // Live progress bar in human mode only.
    let bar_task = (!output::is_quiet() && !output::is_json())
        .then(|| tokio::spawn(drive_progress_bar(rx, query.max_results as u64)));

    let outcome = collector.collect(&query).await;
    if let Some(task) = bar_task {
        let _ = task.await;
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "term": &query.term,
            "total": outcome.records.len(),
            "pages_fetched": outcome.pages_fetched,
            "stop": outcome.stop.label(),
            "warning": &outcome.warning,
            "results": &outcome.records,
        }));
    } else {
        if let Some(warning) = &outcome.warning {
            eprintln!("  Warning: {warning}");
        }
        print_human(&outcome);
    }

    if let Some(variant) = args.download {
        download_all(&outcome.records, variant, &args).await?;
    }

    Ok(())
}

fn print_human(outcome: &crate::collect::Collection) {
    if outcome.records.is_empty() {
        if !output::is_quiet() {
            eprintln!("  No images matched. Try a different term or broader filters.");
        }
        return;
    }

    if output::is_quiet() {
        // Quiet mode still prints the URLs, one per line, for piping.
        for record in &outcome.records {
            println!("{}", record.regular_url);
        }
        return;
    }

    eprintln!(
        "  Collected {} image(s) over {} page(s):",
        outcome.records.len(),
        outcome.pages_fetched
    );
    eprintln!();

    for record in &outcome.records {
        let url = if record.regular_url.len() > 60 {
            format!("{}...", &record.regular_url[..57])
        } else {
            record.regular_url.clone()
        };
        eprintln!(
            "    {:<12} {:>5}x{:<5} likes: {:<6} {:<8} {}",
            record.id, record.width, record.height, record.likes, record.color, url,
        );
    }

    match outcome.stop {
        StopReason::Exhausted => eprintln!("  (results exhausted after {} pages)", outcome.pages_fetched),
        StopReason::EmptyPage => eprintln!("  (endpoint returned an empty page)"),
        _ => {}
    }
}

async fn drive_progress_bar(mut rx: ProgressReceiver, target: u64) {
    let bar = ProgressBar::new(target);
    bar.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} images (page {msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    loop {
        match rx.recv().await {
            Ok(event) => match event.event {
                CollectEventKind::PageProcessed {
                    page,
                    accepted_total,
                    ..
                } => {
                    bar.set_position(accepted_total as u64);
                    bar.set_message(page.to_string());
                }
                CollectEventKind::Warning { message } => {
                    bar.println(format!("  Warning: {message}"));
                }
                CollectEventKind::Finished { .. } => break,
            },
            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
    bar.finish_and_clear();
}

async fn download_all(
    records: &[crate::record::ImageRecord],
    variant: Variant,
    args: &SearchArgs,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    tokio::fs::create_dir_all(&args.out)
        .await
        .with_context(|| format!("creating {}", args.out.display()))?;

    let downloader = Downloader::with_defaults();
    if !output::is_quiet() {
        eprintln!();
        eprintln!("  Downloading {} {variant} variant(s)...", records.len());
    }

    for (i, record) in records.iter().enumerate() {
        match downloader.download(record, variant, &args.out).await {
            Ok(path) => {
                if !output::is_quiet() {
                    eprintln!("    saved {}", path.display());
                }
            }
            Err(err) => eprintln!("  Warning: {err:#}"),
        }
        // Same pacing as page fetches.
        if i + 1 < records.len() {
            tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
        }
    }

    Ok(())
}
