use serde::Serialize;
use std::fmt;

/// Ordinal intent bucket of a lead score.
///
/// Boundaries are right-closed: `(-1,10]` Cold, `(10,50]` Warm,
/// `(50,100]` Hot, `(100,∞)` Very Hot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IntentTag {
    Cold,
    Warm,
    Hot,
    #[serde(rename = "Very Hot")]
    VeryHot,
}

impl IntentTag {
    pub const ALL: [IntentTag; 4] = [
        IntentTag::Cold,
        IntentTag::Warm,
        IntentTag::Hot,
        IntentTag::VeryHot,
    ];

    /// `None` for scores at or below -1 (outside every bucket) or NaN.
    pub fn from_score(score: f64) -> Option<Self> {
        if score.is_nan() || score <= -1.0 {
            None
        } else if score <= 10.0 {
            Some(IntentTag::Cold)
        } else if score <= 50.0 {
            Some(IntentTag::Warm)
        } else if score <= 100.0 {
            Some(IntentTag::Hot)
        } else {
            Some(IntentTag::VeryHot)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::Cold => "Cold",
            IntentTag::Warm => "Warm",
            IntentTag::Hot => "Hot",
            IntentTag::VeryHot => "Very Hot",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cold" => Some(IntentTag::Cold),
            "warm" => Some(IntentTag::Warm),
            "hot" => Some(IntentTag::Hot),
            "very hot" | "veryhot" => Some(IntentTag::VeryHot),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for IntentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
