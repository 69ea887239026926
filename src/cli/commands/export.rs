use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::DashboardRequest;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        sources,
        filters,
        events,
        join,
        format,
        file,
        force,
    } = cmd
    {
        let cfg = super::with_sources(cfg, sources.resolve(cfg)?);

        let mut request = DashboardRequest::from_config(&cfg);
        request.upload = events.as_deref().map(expand_tilde);
        request.join_mode = join.unwrap_or(cfg.join_mode);
        request.filters = filters.to_filter_set(&cfg)?;

        let view = super::http_pipeline(&cfg)?.run(&request)?;
        messages::notices(&view.notices);

        ExportLogic::export(&view.table, *format, file, *force)?;
    }
    Ok(())
}
