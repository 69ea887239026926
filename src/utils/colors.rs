/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::IntentTag;

/// Cold → blue, Warm → yellow, Hot → red, Very Hot → magenta
pub fn color_for_intent(tag: IntentTag) -> &'static str {
    match tag {
        IntentTag::Cold => BLUE,
        IntentTag::Warm => YELLOW,
        IntentTag::Hot => RED,
        IntentTag::VeryHot => MAGENTA,
    }
}

/// Paint an already padded cell: grey for empty values, intent labels in
/// their color, everything else untouched.
pub fn colorize_cell(column: &str, raw: &str, padded: &str) -> String {
    if raw.trim().is_empty() {
        return format!("{GREY}{padded}{RESET}");
    }
    if column == crate::core::kpi::INTENT
        && let Some(tag) = IntentTag::from_label(raw)
    {
        return format!("{}{padded}{RESET}", color_for_intent(tag));
    }
    padded.to_string()
}
