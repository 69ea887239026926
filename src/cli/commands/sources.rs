use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, success, warning};
use crate::utils::formatting::pad_right;
use ansi_term::Colour;

/// Handle the `sources` command: load every source and report per project.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sources { sources } = cmd {
        let entries = sources.resolve(cfg)?;
        let mut adapter = super::http_adapter(cfg)?;

        header("Lead sources");
        let report = adapter.load_all(&entries)?;

        let name_w = entries.iter().map(|e| e.project.len()).max().unwrap_or(7).max(7);
        for entry in &entries {
            let failure = report.failures.iter().find(|f| f.project == entry.project);
            match (failure, report.by_project.get(&entry.project)) {
                (Some(f), _) => println!(
                    "  {} {} {}",
                    Colour::Red.paint("✗"),
                    pad_right(&entry.project, name_w),
                    f.error
                ),
                (None, Some(t)) => println!(
                    "  {} {} {} rows, {} columns",
                    Colour::Green.paint("✓"),
                    pad_right(&entry.project, name_w),
                    t.len(),
                    t.columns.len()
                ),
                (None, None) => {}
            }
        }

        // valori disponibili per --source / --micro-market
        for (label, column) in [
            ("Source", &cfg.source_column),
            ("Micro Market", &cfg.micro_market_column),
        ] {
            let values = report.combined.distinct_values(column);
            if !values.is_empty() {
                println!("  {} {}", pad_right(&format!("{label}:"), name_w + 2), values.join(", "));
            }
        }

        println!();
        if report.failures.is_empty() {
            success(format!("{} leads from {} sources", report.combined.len(), entries.len()));
        } else {
            warning(format!(
                "{} leads loaded, {} of {} sources failed",
                report.combined.len(),
                report.failures.len(),
                entries.len()
            ));
        }
    }
    Ok(())
}
