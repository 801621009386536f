//! Files progress: a weighted bar for per-file fan-out stages

use crate::error::{Result, TaskError};
use crate::scope::TICK_INTERVAL;
use futures_util::{stream, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

const BYTES_TEMPLATE: &str =
    "{spinner:.cyan} {prefix} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}";
const COUNT_TEMPLATE: &str = "{spinner:.cyan} {prefix} [{bar:30.cyan/blue}] {msg} ({eta})";

/// A progress bar advanced once per processed file
///
/// Weighted by bytes when a byte total is known, by file count otherwise.
/// Workers never touch the bar: each finished item sends its weight to a
/// single consumer task, which owns every progress update.
pub struct FilesProgress {
    bar: ProgressBar,
    total_files: u64,
    by_bytes: bool,
    concurrency: usize,
    processed: Arc<AtomicU64>,
}

impl FilesProgress {
    pub(crate) fn new(
        bar: ProgressBar,
        total_files: usize,
        total_bytes: Option<u64>,
        concurrency: usize,
    ) -> Self {
        let total_files = total_files as u64;
        let (length, template) = match total_bytes {
            Some(bytes) => (bytes, BYTES_TEMPLATE),
            None => (total_files, COUNT_TEMPLATE),
        };

        bar.set_length(length);
        bar.set_style(
            ProgressStyle::with_template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.set_prefix("Processing files");
        bar.set_message(format!("0/{total_files} files"));

        Self {
            bar,
            total_files,
            by_bytes: total_bytes.is_some(),
            concurrency: concurrency.max(1),
            processed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replace the default "Processing files" label
    pub fn set_label(&self, label: impl Into<String>) {
        self.bar.set_prefix(label.into());
    }

    /// Items processed so far
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Acquire)
    }

    /// Bar position, in bytes or files
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Run blocking `work` on every item, at most `concurrency` at a time
    ///
    /// Results come back in input order whatever order the items finish in.
    /// `weight` gives the bytes an item adds to a byte-weighted bar.
    pub async fn process<T, R, W, F>(&self, items: Vec<T>, weight: W, work: F) -> Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        W: Fn(&T) -> u64,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        tracing::debug!(items = items.len(), concurrency = self.concurrency, "Processing files");

        let (advance, advances) = mpsc::unbounded_channel();
        let lane = tokio::spawn(advance_lane(
            advances,
            self.bar.clone(),
            Arc::clone(&self.processed),
            self.total_files,
            self.by_bytes,
        ));
        self.bar.enable_steady_tick(TICK_INTERVAL);

        let work = Arc::new(work);
        let results = stream::iter(items)
            .map(|item| {
                let weight = weight(&item);
                let work = Arc::clone(&work);
                let advance = advance.clone();
                async move {
                    let result = tokio::task::spawn_blocking(move || work(item)).await?;
                    let _ = advance.send(weight);
                    Ok::<_, TaskError>(result)
                }
            })
            .buffered(self.concurrency)
            .try_collect::<Vec<_>>()
            .await;

        drop(advance);
        lane.await?;

        if results.is_ok() {
            self.bar.finish();
        } else {
            self.bar.abandon();
        }
        results
    }
}

async fn advance_lane(
    mut advances: mpsc::UnboundedReceiver<u64>,
    bar: ProgressBar,
    processed: Arc<AtomicU64>,
    total_files: u64,
    by_bytes: bool,
) {
    while let Some(weight) = advances.recv().await {
        let done = processed.fetch_add(1, Ordering::AcqRel) + 1;
        bar.inc(if by_bytes { weight } else { 1 });
        bar.set_message(format!("{done}/{total_files} files"));
    }
}
