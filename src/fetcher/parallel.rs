use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use futures::Stream;
use tokio::sync::{mpsc, Semaphore};

use crate::app::Result;
use crate::domain::{MovieRecord, Resolution, ResolutionFailure};

pub const DEFAULT_WORKERS: usize = 10;

/// Resolves a human-readable title to one catalog record.
#[async_trait]
pub trait TitleLookup {
    /// `Ok(None)` when the catalog has no exact match.
    async fn lookup(&self, title: &str) -> Result<Option<MovieRecord>>;
}

/// Bounded fan-out of title lookups.
///
/// At most `workers` lookups are in flight at once; the rest wait for a
/// permit. Results are streamed back in completion order, each tagged as a
/// record or a [`ResolutionFailure`], so one bad title never aborts the batch.
#[derive(Clone)]
pub struct ParallelResolver {
    lookup: Arc<dyn TitleLookup + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelResolver {
    pub fn new(lookup: Arc<dyn TitleLookup + Send + Sync>) -> Self {
        Self::with_workers(lookup, DEFAULT_WORKERS)
    }

    pub fn with_workers(lookup: Arc<dyn TitleLookup + Send + Sync>, workers: usize) -> Self {
        Self {
            lookup,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Submit every title at once and stream results as they complete.
    ///
    /// Dropping the stream early does not cancel submitted lookups: they run
    /// to completion and their results are discarded.
    pub fn resolve_all(
        &self,
        titles: Vec<String>,
    ) -> impl Stream<Item = Resolution> + Send + 'static {
        let (tx, mut rx) = mpsc::unbounded_channel();

        for title in titles {
            let lookup = self.lookup.clone();
            let semaphore = self.semaphore.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let resolution = match semaphore.acquire().await {
                    Ok(_permit) => resolve_one(lookup.as_ref(), title).await,
                    Err(e) => Err(ResolutionFailure::new(title, e.to_string())),
                };
                // The consumer may have stopped listening.
                let _ = tx.send(resolution);
            });
        }
        drop(tx);

        stream! {
            while let Some(resolution) = rx.recv().await {
                yield resolution;
            }
        }
    }
}

async fn resolve_one(lookup: &(dyn TitleLookup + Send + Sync), title: String) -> Resolution {
    match lookup.lookup(&title).await {
        Ok(Some(movie)) => Ok(movie),
        Ok(None) => Err(ResolutionFailure::not_found(title)),
        Err(e) => Err(ResolutionFailure::new(title, e.to_string())),
    }
}
