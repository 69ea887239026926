//! Unified application error type.
//! All modules (source, core, export, cli) return AppError to keep the error
//! handling consistent and easy to surface to the user.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Record sources
    // ---------------------------
    #[error("Source '{project}' unavailable: {reason}")]
    SourceUnavailable { project: String, reason: String },

    #[error("None of the {0} lead sources could be loaded")]
    AllSourcesFailed(usize),

    // ---------------------------
    // Merge / upload
    // ---------------------------
    #[error("Schema mismatch: column '{column}' missing from {table} table")]
    SchemaMismatch { table: String, column: String },

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    // ---------------------------
    // Filters
    // ---------------------------
    #[error("Filter column '{0}' not found, filter skipped")]
    FilterColumnMissing(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Errors that only invalidate the merge step; the baseline stays viewable.
    pub fn is_merge_local(&self) -> bool {
        matches!(
            self,
            AppError::SchemaMismatch { .. } | AppError::MalformedUpload(_) | AppError::Workbook(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
