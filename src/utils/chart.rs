//! Horizontal ASCII bar charts (terminal stand-in for dashboard charts).

use crate::utils::formatting::{pad_left, pad_right, truncate};
use unicode_width::UnicodeWidthStr;

const LABEL_MAX: usize = 24;

/// One bar per `(label, count)`; the longest bar spans `width` cells.
pub fn bar_chart(series: &[(String, usize)], width: usize) -> String {
    let max = series.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let label_w = series
        .iter()
        .map(|(l, _)| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0)
        .min(LABEL_MAX);
    let count_w = max.to_string().len();

    let mut out = String::new();
    for (label, n) in series {
        let len = if max == 0 { 0 } else { (n * width).div_ceil(max) };
        out.push_str(&format!(
            "  {} │{} {}\n",
            pad_right(&truncate(label, label_w), label_w),
            "█".repeat(len),
            pad_left(&n.to_string(), count_w)
        ));
    }
    out
}
