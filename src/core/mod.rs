pub mod filter;
pub mod join;
pub mod kpi;
pub mod pipeline;
pub mod summary;

pub use filter::{apply_filters, apply_filters_with_report};
pub use join::{JoinMode, join};
pub use kpi::{KpiDeriver, derive};
pub use pipeline::{DashboardRequest, DashboardView, Pipeline, build_view};
pub use summary::{DashboardSummary, summarize};
