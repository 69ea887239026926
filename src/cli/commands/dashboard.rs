use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::DashboardRequest;
use crate::errors::AppResult;
use crate::ui::{dashboard, messages};
use crate::utils::path::expand_tilde;

/// Handle the `dashboard` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard {
        sources,
        filters,
        events,
        join,
        columns,
        limit,
        json,
    } = cmd
    {
        let cfg = super::with_sources(cfg, sources.resolve(cfg)?);

        let mut request = DashboardRequest::from_config(&cfg);
        request.upload = events.as_deref().map(expand_tilde);
        request.join_mode = join.unwrap_or(cfg.join_mode);
        request.filters = filters.to_filter_set(&cfg)?;

        let mut pipeline = super::http_pipeline(&cfg)?;
        let view = pipeline.run(&request)?;

        messages::notices(&view.notices);

        if *json {
            println!("{}", serde_json::to_string_pretty(&view.summary)?);
            return Ok(());
        }

        if request.upload.is_none() {
            messages::info("No web events file given (--events); showing leads without web KPIs.");
        }

        let cols: Vec<String> = match columns {
            Some(c) => c.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
            None => cfg.table_columns.clone(),
        };
        dashboard::print(&view, &cols, limit.unwrap_or(cfg.table_limit));
    }
    Ok(())
}
