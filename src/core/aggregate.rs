//! Aggregation driver for the currency screen: one "resolve many" primitive
//! with an explicit execution policy, plus the refresh/retry operations that
//! use it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info};

use crate::core::currency::{CountryRef, CountrySource, CurrencyRecord, CurrencyResolver};

/// A full refresh stops after this many countries.
pub const MAX_COUNTRIES: usize = 30;

/// Pause between sequential lookups so the SOAP service is not overwhelmed.
pub const SEQUENTIAL_PAUSE: Duration = Duration::from_millis(100);

/// How a batch of currency lookups is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// One request at a time, pausing between calls (no pause after the last).
    Sequential { pause: Duration },
    /// All requests in flight at once, joined at the end.
    Concurrent,
}

/// Resolves the currency of every country in `countries` under `policy`.
/// Output order always matches input order; individual failures surface as
/// error-flagged records. `on_progress` is called as `(done, total)`.
pub async fn resolve_many(
    resolver: &dyn CurrencyResolver,
    countries: &[CountryRef],
    policy: FetchPolicy,
    on_progress: &(dyn Fn(usize, usize) + Sync),
) -> Vec<CurrencyRecord> {
    let total = countries.len();
    match policy {
        FetchPolicy::Sequential { pause } => {
            let mut records = Vec::with_capacity(total);
            for (i, country) in countries.iter().enumerate() {
                debug!("Fetching currency for {} - {}", country.code, country.name);
                records.push(resolver.resolve_currency(&country.code, &country.name).await);
                on_progress(i + 1, total);
                if i + 1 < total {
                    tokio::time::sleep(pause).await;
                }
            }
            records
        }
        FetchPolicy::Concurrent => {
            let done = AtomicUsize::new(0);
            let futures = countries.iter().map(|country| {
                let done = &done;
                async move {
                    let record = resolver.resolve_currency(&country.code, &country.name).await;
                    on_progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
                    record
                }
            });
            join_all(futures).await
        }
    }
}

/// Outcome of a retry pass over the failed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// Nothing was failed, so nothing was fetched.
    NothingToRetry,
    Retried {
        recovered: usize,
        still_failing: usize,
    },
}

/// Holds the currency screen state: the last aggregate result plus the
/// loading/error flags the presentation layer renders.
pub struct Aggregator<'a> {
    source: &'a dyn CountrySource,
    resolver: &'a dyn CurrencyResolver,
    pub refresh_policy: FetchPolicy,
    pub retry_policy: FetchPolicy,
    pub loading: bool,
    pub last_error: Option<String>,
    result: Vec<CurrencyRecord>,
}

impl<'a> Aggregator<'a> {
    pub fn new(source: &'a dyn CountrySource, resolver: &'a dyn CurrencyResolver) -> Self {
        Aggregator {
            source,
            resolver,
            refresh_policy: FetchPolicy::Sequential {
                pause: SEQUENTIAL_PAUSE,
            },
            retry_policy: FetchPolicy::Concurrent,
            loading: false,
            last_error: None,
            result: Vec::new(),
        }
    }

    pub fn result(&self) -> &[CurrencyRecord] {
        &self.result
    }

    pub fn success_count(&self) -> usize {
        self.result.iter().filter(|r| !r.is_failed()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.result.iter().filter(|r| r.is_failed()).count()
    }

    /// Rebuilds the whole result: list countries, cap at [`MAX_COUNTRIES`],
    /// resolve each under the refresh policy. The stored result is replaced
    /// in one assignment once the batch completes.
    pub async fn refresh_all(
        &mut self,
        on_progress: &(dyn Fn(usize, usize) + Sync),
    ) -> &[CurrencyRecord] {
        self.loading = true;
        self.last_error = None;

        let mut countries = self.source.list_countries().await;
        info!("Fetched {} countries", countries.len());
        countries.truncate(MAX_COUNTRIES);

        self.result = resolve_many(self.resolver, &countries, self.refresh_policy, on_progress).await;
        self.loading = false;
        &self.result
    }

    /// Re-resolves only the failed records under the retry policy, then
    /// merges: a record is replaced only when its retry carries no error.
    /// Ordering is unchanged from before the retry.
    pub async fn retry_failed(
        &mut self,
        on_progress: &(dyn Fn(usize, usize) + Sync),
    ) -> RetryOutcome {
        let failed: Vec<CountryRef> = self
            .result
            .iter()
            .filter(|r| r.is_failed())
            .map(|r| CountryRef::new(&r.country_code, &r.country_name))
            .collect();

        if failed.is_empty() {
            self.last_error = Some("No failed currencies to retry".to_string());
            return RetryOutcome::NothingToRetry;
        }

        self.loading = true;
        self.last_error = None;
        info!("Retrying {} failed currency fetches", failed.len());

        let retried = resolve_many(self.resolver, &failed, self.retry_policy, on_progress).await;

        let mut recovered = 0;
        for record in &mut self.result {
            let Some(retry) = retried
                .iter()
                .find(|r| r.country_code == record.country_code)
            else {
                continue;
            };
            if retry.error.is_none() {
                *record = retry.clone();
                recovered += 1;
            }
        }

        self.loading = false;
        RetryOutcome::Retried {
            recovered,
            still_failing: failed.len() - recovered,
        }
    }
}
