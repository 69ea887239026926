#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use leadlens::errors::{AppError, AppResult};
use leadlens::models::{Table, Value};
use leadlens::source::{FetchAuth, RecordFetcher, SourceLocation};
use std::cell::Cell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lead() -> Command {
    cargo_bin_cmd!("leadlens")
}

/// Create a unique temp file path and remove any existing file
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("leadlens_{}.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a fresh temp file and return its path
pub fn fixture(name: &str, ext: &str, content: &str) -> String {
    let p = temp_path(name, ext);
    fs::write(&p, content).expect("write fixture");
    p
}

/// A config path that does not exist (defaults are used)
pub fn no_config(name: &str) -> String {
    temp_path(&format!("{name}_config"), "conf")
}

/// Build a table from string cells typed with `Value::parse_cell`
pub fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_raw(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
        &[],
    )
}

pub fn num(v: &Value) -> f64 {
    v.as_f64().expect("numeric cell")
}

pub const LEADS_ALPHA: &str = "\
masterLeadId,Source,Micro Market,Call Duration,Score,Orange,Budget
L1,Ads,North,120,0.8,true,1Cr
L2,Organic,South,30,0.4,false,
L3,Ads,North,600,0.9,true,
";

pub const LEADS_BETA: &str = "\
masterLeadId,Source,Call Duration,Score
L4,Referral,90,0.6
";

pub const WEB_EVENTS: &str = "\
masterLeadId,Home Page Time,Plans Page Time,Price Page Time,Total Click Events,Last_Visit_Timestamp
L1,5,0,12,2,2025-10-01 10:00:00
L3,40,20,0,1,2025-09-15 08:30:00
";

/// In-memory fetcher keyed by location string; counts fetches.
#[derive(Default)]
pub struct MemFetcher {
    pub tables: HashMap<String, Table>,
    pub calls: Cell<usize>,
}

impl MemFetcher {
    pub fn with(mut self, location: &str, table: Table) -> Self {
        self.tables.insert(location.to_string(), table);
        self
    }
}

impl RecordFetcher for MemFetcher {
    fn fetch(&self, location: &SourceLocation, _auth: &FetchAuth) -> AppResult<Table> {
        self.calls.set(self.calls.get() + 1);
        self.tables
            .get(&location.to_string())
            .cloned()
            .ok_or_else(|| AppError::Other(format!("unreachable: {location}")))
    }
}
