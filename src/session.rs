use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::FetchResult;
use crate::export;
use crate::fetcher::{Attempt, PaintingFetcher};
use crate::history::History;
use crate::painting::PaintingRecord;

/// Everything a browsing session mutates: history, position and the set of
/// images already shown.
pub struct BrowsingSession {
    fetcher: PaintingFetcher,
    history: History,
    seen: HashSet<String>,
    allow_repeats: bool,
    save_dir: PathBuf,
}

impl BrowsingSession {
    pub fn new(config: &Config) -> FetchResult<Self> {
        Ok(Self {
            fetcher: PaintingFetcher::new(config)?,
            history: History::new(),
            seen: HashSet::new(),
            allow_repeats: config.allow_repeats,
            save_dir: config.save_dir.clone(),
        })
    }

    pub async fn step_forward(&mut self) -> FetchResult<&PaintingRecord> {
        self.step_forward_with(|_| {}).await
    }

    /// Fetch a new painting and make it current. History is left untouched
    /// when the fetch fails.
    pub async fn step_forward_with<F>(&mut self, on_attempt: F) -> FetchResult<&PaintingRecord>
    where
        F: FnMut(Attempt<'_>),
    {
        let seen = (!self.allow_repeats).then_some(&self.seen);
        let record = self.fetcher.fetch_random(seen, on_attempt).await?;

        self.seen.insert(record.url().to_string());
        Ok(self.history.push(record))
    }

    pub fn step_back(&mut self) -> Option<&PaintingRecord> {
        self.history.go_back()
    }

    pub async fn save_current(&self) -> FetchResult<Option<PathBuf>> {
        match self.history.current() {
            Some(record) => {
                let path =
                    export::save_image(self.fetcher.client(), record.url(), &self.save_dir).await?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    pub fn current(&self) -> Option<&PaintingRecord> {
        self.history.current()
    }

    pub fn position(&self) -> Option<usize> {
        self.history.position()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn back_disabled(&self) -> bool {
        self.history.back_disabled()
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }
}
