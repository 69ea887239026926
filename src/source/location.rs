use crate::utils::path::expand_tilde;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Where a lead sheet lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Any URL returning CSV (Google Sheets links are rewritten to their export URL).
    Url(String),
    /// CSV or workbook on disk.
    File(PathBuf),
}

fn sheet_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("valid regex"))
}

fn gid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#&?]gid=([0-9]+)").expect("valid regex"))
}

impl SourceLocation {
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            SourceLocation::Url(Self::csv_export_url(s))
        } else {
            SourceLocation::File(expand_tilde(s))
        }
    }

    /// Rewrite a Google Sheets link to its public CSV export; other URLs pass through.
    pub fn csv_export_url(url: &str) -> String {
        if url.contains("/export?") {
            return url.to_string();
        }
        match sheet_id_regex().captures(url) {
            Some(caps) => {
                let mut out = format!(
                    "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
                    &caps[1]
                );
                if let Some(gid) = gid_regex().captures(url) {
                    out.push_str("&gid=");
                    out.push_str(&gid[1]);
                }
                out
            }
            None => url.to_string(),
        }
    }

    /// Cache key for this location.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(u) => f.write_str(u),
            SourceLocation::File(p) => write!(f, "{}", p.display()),
        }
    }
}
