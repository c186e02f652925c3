use serde::{Deserialize, Serialize};

/// Which prompt template and payload shaping a request uses.
///
/// Kinds arrive as strings from callers; anything unrecognized falls
/// back to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    General,
    CurrentLoad,
    Pricing,
}

impl InsightKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "currentLoad" => Self::CurrentLoad,
            "pricing" => Self::Pricing,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::CurrentLoad => "currentLoad",
            Self::Pricing => "pricing",
        }
    }
}

/// Sampling and length options passed to the upstream model.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_tokens: u32,
    pub stop: Vec<String>,
    pub repeat_penalty: f64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_k: 40,
            top_p: 0.9,
            max_tokens: 200,
            // Bullet lists stop after three points
            stop: vec!["\n\n".to_string(), "4.".to_string()],
            repeat_penalty: 1.1,
        }
    }
}

// One hour of the synthetic day. Field names stay camelCase on the
// wire so payloads match what the dashboard sends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlySlot {
    pub time_slot: String,
    pub load: u32,
    pub term_ahead_price: f64,
    pub real_time_price: f64,
    pub saving: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_load: u64,
    pub peak_load: u32,
    pub avg_load: u32,
    pub avg_term_ahead: f64,
    pub avg_real_time: f64,
    pub total_savings: i64,
}

/// Where an insight string came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum InsightSource {
    Cache,
    Generated,
    /// Degraded output: every attempt against the upstream failed.
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: String,
    pub text: String,
    pub source: InsightSource,
}
