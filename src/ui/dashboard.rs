//! Terminal rendering of a `DashboardView`: metrics, charts, lead table.

use crate::core::pipeline::DashboardView;
use crate::ui::messages::header;
use crate::utils::chart::bar_chart;
use crate::utils::colors::{RESET, color_for_intent};
use crate::utils::formatting::{bold, metric, secs2readable};
use crate::utils::table::TextTable;

const BAR_WIDTH: usize = 30;

pub fn render(view: &DashboardView) -> String {
    let s = &view.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "{} leads shown (of {} loaded{})\n",
        bold(&s.leads.to_string()),
        view.baseline_rows,
        if view.merged { ", merged with web events" } else { "" }
    ));

    out.push_str("\nWeb Behavior KPIs\n");
    out.push_str(&format!("  Avg Page Depth : {}\n", metric(s.avg_page_depth)));
    out.push_str(&format!(
        "  Avg Total Time : {}{}\n",
        metric(s.avg_total_time),
        s.avg_total_time
            .map(|t| format!(" ({})", secs2readable(t)))
            .unwrap_or_default()
    ));
    out.push_str(&format!("  Avg Lead Score : {}\n", metric(s.avg_lead_score)));
    out.push_str(&format!("  Recent Visit   : {}\n", s.most_recent_visit_label()));

    out.push_str("\nIntent\n");
    for (tag, n) in &s.intent_distribution {
        out.push_str(&format!(
            "  {}{:<8}{} {}\n",
            color_for_intent(*tag),
            tag.as_str(),
            RESET,
            n
        ));
    }

    if !s.leads_by_project.is_empty() {
        out.push_str("\nLeads by Project\n");
        let series: Vec<(String, usize)> = s
            .leads_by_project
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        out.push_str(&bar_chart(&series, BAR_WIDTH));
    }

    if !s.leads_by_source.is_empty() {
        out.push_str("\nLeads by Source\n");
        let series: Vec<(String, usize)> = s
            .leads_by_source
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        out.push_str(&bar_chart(&series, BAR_WIDTH));
    }

    out
}

/// Lead table restricted to `columns` that exist (all columns when none do).
pub fn render_table(view: &DashboardView, columns: &[String], limit: usize) -> String {
    let picked = view.table.select(columns);
    let table = if picked.columns.is_empty() {
        &view.table
    } else {
        &picked
    };

    let mut out = TextTable::from_table(table, limit).render();
    if limit > 0 && table.len() > limit {
        out.push_str(&format!("… {} more rows (use --limit 0 to show all)\n", table.len() - limit));
    }
    out
}

pub fn print(view: &DashboardView, columns: &[String], limit: usize) {
    header("Lead Dashboard");
    print!("{}", render(view));
    header("Filtered Leads");
    print!("{}", render_table(view, columns, limit));
}
