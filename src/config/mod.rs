use crate::core::join::JoinMode;
use crate::errors::{AppError, AppResult};
use crate::models::CombineMode;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod check;

/// One named lead sheet (public export URL, Google Sheets link or local file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub project: String,
    pub location: String,
    /// Environment variable holding a bearer token for authenticated sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default = "default_project_column")]
    pub project_column: String,
    #[serde(default = "default_upload_sheet")]
    pub upload_sheet: String,
    #[serde(default)]
    pub join_mode: JoinMode,
    #[serde(default)]
    pub combine_mode: CombineMode,
    /// Explicit page-time columns; empty means "every column ending in `page_suffix`".
    #[serde(default)]
    pub page_columns: Vec<String>,
    #[serde(default = "default_page_suffix")]
    pub page_suffix: String,
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    #[serde(default = "default_call_duration_column")]
    pub call_duration_column: String,
    #[serde(default = "default_score_column")]
    pub score_column: String,
    #[serde(default = "default_click_events_column")]
    pub click_events_column: String,
    #[serde(default = "default_micro_market_column")]
    pub micro_market_column: String,
    #[serde(default = "default_source_column")]
    pub source_column: String,
    #[serde(default = "default_flag_column")]
    pub flag_column: String,
    #[serde(default = "default_flag_fields")]
    pub flag_fields: Vec<String>,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_http_retry")]
    pub http_retry: bool,
    #[serde(default = "default_table_columns")]
    pub table_columns: Vec<String>,
    #[serde(default = "default_table_limit")]
    pub table_limit: usize,
}

fn default_id_column() -> String {
    "masterLeadId".to_string()
}
fn default_project_column() -> String {
    "Project".to_string()
}
fn default_upload_sheet() -> String {
    "Main".to_string()
}
fn default_page_suffix() -> String {
    " Page Time".to_string()
}
fn default_timestamp_column() -> String {
    "Last_Visit_Timestamp".to_string()
}
fn default_call_duration_column() -> String {
    "Call Duration".to_string()
}
fn default_score_column() -> String {
    "Score".to_string()
}
fn default_click_events_column() -> String {
    "Total Click Events".to_string()
}
fn default_micro_market_column() -> String {
    "Micro Market".to_string()
}
fn default_source_column() -> String {
    "Source".to_string()
}
fn default_flag_column() -> String {
    "Orange".to_string()
}
fn default_flag_fields() -> Vec<String> {
    [
        "Buying Reason",
        "SFT",
        "Budget",
        "Floor",
        "Handover",
        "SiteVisitPreference",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_http_timeout() -> u64 {
    30
}
fn default_http_retry() -> bool {
    true
}
fn default_table_columns() -> Vec<String> {
    [
        "masterLeadId",
        "Project",
        "Source",
        "Page Depth",
        "Total Time",
        "Recency Days",
        "Lead Score",
        "Intent",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_table_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            id_column: default_id_column(),
            project_column: default_project_column(),
            upload_sheet: default_upload_sheet(),
            join_mode: JoinMode::default(),
            combine_mode: CombineMode::default(),
            page_columns: Vec::new(),
            page_suffix: default_page_suffix(),
            timestamp_column: default_timestamp_column(),
            call_duration_column: default_call_duration_column(),
            score_column: default_score_column(),
            click_events_column: default_click_events_column(),
            micro_market_column: default_micro_market_column(),
            source_column: default_source_column(),
            flag_column: default_flag_column(),
            flag_fields: default_flag_fields(),
            http_timeout_secs: default_http_timeout(),
            http_retry: default_http_retry(),
            table_columns: default_table_columns(),
            table_limit: default_table_limit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("leadlens")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".leadlens")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("leadlens.conf")
    }

    /// Load configuration from `path`, or return defaults if the file is missing.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Write this configuration as YAML to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Page-time columns present in `columns`, explicit list first.
    pub fn resolve_page_columns(&self, columns: &[String]) -> Vec<String> {
        if !self.page_columns.is_empty() {
            return self
                .page_columns
                .iter()
                .filter(|c| columns.contains(c))
                .cloned()
                .collect();
        }
        columns
            .iter()
            .filter(|c| c.ends_with(&self.page_suffix))
            .cloned()
            .collect()
    }
}
