//! Record source adapter: fetch every configured lead sheet, tag rows with
//! their project and stack them into one table.

pub mod cache;
pub mod fetcher;
pub mod location;
pub mod reader;
pub mod upload;

pub use cache::SourceCache;
pub use fetcher::{FetchAuth, HttpFetcher, RecordFetcher};
pub use location::SourceLocation;

use crate::config::SourceEntry;
use crate::errors::{AppError, AppResult};
use crate::models::{Table, Value};
use std::collections::BTreeMap;

/// A source that could not be loaded during `load_all`.
#[derive(Debug)]
pub struct SourceFailure {
    pub project: String,
    pub error: AppError,
}

/// Result of loading every source.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub by_project: BTreeMap<String, Table>,
    pub combined: Table,
    pub failures: Vec<SourceFailure>,
    /// Projects served from the cache instead of being fetched.
    pub cached: Vec<String>,
}

pub struct SourceAdapter<F: RecordFetcher> {
    fetcher: F,
    cache: SourceCache,
    project_column: String,
}

impl<F: RecordFetcher> SourceAdapter<F> {
    pub fn new(fetcher: F, cache: SourceCache, project_column: impl Into<String>) -> Self {
        Self {
            fetcher,
            cache,
            project_column: project_column.into(),
        }
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SourceCache {
        &mut self.cache
    }

    /// Fetch (or reuse) a single source; failures come back as `SourceUnavailable`.
    pub fn load_one(&mut self, entry: &SourceEntry) -> AppResult<(Table, bool)> {
        let location = SourceLocation::parse(&entry.location);
        let key = location.key();

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(project = %entry.project, %key, "source served from cache");
            return Ok((self.tag(hit.table.clone(), &entry.project), true));
        }

        let auth = resolve_auth(entry)?;
        let table = self
            .fetcher
            .fetch(&location, &auth)
            .map_err(|e| AppError::SourceUnavailable {
                project: entry.project.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(project = %entry.project, rows = table.len(), "source loaded");
        let fresh = self.cache.insert(&key, table).table.clone();
        Ok((self.tag(fresh, &entry.project), false))
    }

    /// Load every source. Individual failures are recorded and skipped;
    /// only when *all* sources fail does this return `AllSourcesFailed`.
    pub fn load_all(&mut self, entries: &[SourceEntry]) -> AppResult<LoadReport> {
        if entries.is_empty() {
            return Err(AppError::Config(
                "no lead sources configured (add entries under `sources:` or pass --sheet)".into(),
            ));
        }

        let mut report = LoadReport::default();
        let mut loaded: Vec<Table> = Vec::new();

        for entry in entries {
            match self.load_one(entry) {
                Ok((table, from_cache)) => {
                    if from_cache {
                        report.cached.push(entry.project.clone());
                    }
                    let slot = report.by_project.entry(entry.project.clone()).or_default();
                    *slot = Table::concat([&*slot, &table]);
                    loaded.push(table);
                }
                Err(error) => {
                    tracing::warn!(project = %entry.project, %error, "skipping source");
                    report.failures.push(SourceFailure {
                        project: entry.project.clone(),
                        error,
                    });
                }
            }
        }

        if loaded.is_empty() {
            return Err(AppError::AllSourcesFailed(entries.len()));
        }

        report.combined = Table::concat(loaded.iter());
        Ok(report)
    }

    fn tag(&self, mut table: Table, project: &str) -> Table {
        table.fill_column(&self.project_column, Value::Text(project.to_string()));
        table
    }
}

fn resolve_auth(entry: &SourceEntry) -> AppResult<FetchAuth> {
    let Some(var) = &entry.token_env else {
        return Ok(FetchAuth::default());
    };
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(FetchAuth {
            bearer_token: Some(token.trim().to_string()),
        }),
        _ => Err(AppError::SourceUnavailable {
            project: entry.project.clone(),
            reason: format!("credential variable {var} is not set"),
        }),
    }
}
