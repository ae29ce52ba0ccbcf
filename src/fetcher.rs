use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use crate::catalog::{self, CandidateFilter};
use crate::client::CommonsClient;
use crate::config::{Config, DEFAULT_SOURCES};
use crate::error::{FetchError, FetchResult};
use crate::painting::PaintingRecord;

/// Reported to the caller before each catalog query.
#[derive(Debug, Clone, Copy)]
pub struct Attempt<'a> {
    pub number: u32,
    pub max: u32,
    pub source: &'a str,
}

pub struct PaintingFetcher {
    client: CommonsClient,
    rng: StdRng,
    sources: Vec<String>,
    max_attempts: u32,
    year_cutoff: u32,
}

impl PaintingFetcher {
    pub fn new(config: &Config) -> FetchResult<Self> {
        let sources = if config.sources.is_empty() {
            DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
        } else {
            config.sources.clone()
        };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            client: CommonsClient::new(config.endpoint.clone())?,
            rng,
            sources,
            max_attempts: config.max_attempts.max(1),
            year_cutoff: config.year_cutoff,
        })
    }

    pub fn client(&self) -> &CommonsClient {
        &self.client
    }

    /// Fetch one random painting, retrying with a fresh source until one
    /// yields a candidate or `max_attempts` queries have failed.
    pub async fn fetch_random<F>(
        &mut self,
        seen: Option<&HashSet<String>>,
        mut on_attempt: F,
    ) -> FetchResult<PaintingRecord>
    where
        F: FnMut(Attempt<'_>),
    {
        let mut last_error: Option<FetchError> = None;

        for number in 1..=self.max_attempts {
            let source = self.choose_source();
            on_attempt(Attempt {
                number,
                max: self.max_attempts,
                source: &source,
            });
            debug!(attempt = number, source = %source, "querying catalog");

            match self.try_source(&source, seen).await {
                Ok(record) => {
                    info!(
                        attempt = number,
                        source = %source,
                        url = record.url(),
                        title = record.title(),
                        "selected painting"
                    );
                    return Ok(record);
                }
                Err(err) if err.is_retryable() => {
                    warn!(attempt = number, source = %source, error = %err, "attempt failed");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        let last = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts made".to_string());
        error!(attempts = self.max_attempts, last = %last, "giving up on fetching a painting");
        Err(FetchError::Exhausted {
            attempts: self.max_attempts,
            last,
        })
    }

    async fn try_source(
        &mut self,
        source: &str,
        seen: Option<&HashSet<String>>,
    ) -> FetchResult<PaintingRecord> {
        let pages = self.client.category_members(source).await?.into_pages()?;
        let total = pages.len();
        let filter = CandidateFilter {
            year_cutoff: self.year_cutoff,
            seen,
        };
        let found = catalog::candidates(pages, &filter);
        debug!(source, total, candidates = found.len(), "filtered catalog page");

        catalog::pick(found, &mut self.rng)
            .map(|candidate| candidate.into_record())
            .ok_or_else(|| FetchError::NoCandidates {
                category: source.to_string(),
            })
    }

    fn choose_source(&mut self) -> String {
        self.sources
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_SOURCES[0].to_string())
    }
}
