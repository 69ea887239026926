pub mod config;
pub mod dashboard;
pub mod export;
pub mod init;
pub mod sources;

use crate::config::{Config, SourceEntry};
use crate::core::pipeline::Pipeline;
use crate::errors::AppResult;
use crate::source::{HttpFetcher, SourceAdapter, SourceCache};

/// Adapter over the production fetcher, identifier column kept as text.
pub(crate) fn http_adapter(cfg: &Config) -> AppResult<SourceAdapter<HttpFetcher>> {
    let fetcher = HttpFetcher::new(
        cfg.http_timeout_secs,
        cfg.http_retry,
        vec![cfg.id_column.clone()],
    )?;
    Ok(SourceAdapter::new(
        fetcher,
        SourceCache::new(),
        cfg.project_column.clone(),
    ))
}

/// Config copy with the sources replaced by the resolved `--sheet` list.
pub(crate) fn with_sources(cfg: &Config, sources: Vec<SourceEntry>) -> Config {
    Config {
        sources,
        ..cfg.clone()
    }
}

pub(crate) fn http_pipeline(cfg: &Config) -> AppResult<Pipeline<'_, HttpFetcher>> {
    Ok(Pipeline::new(cfg, http_adapter(cfg)?))
}
