//! Display formatting for prices, rates and probabilities.

use serde::{Deserialize, Serialize};

use crate::core::types::{Price, Rate};

/// Probability at or above which a milestone is considered likely.
pub const HIGH_PROBABILITY_PCT: f64 = 70.0;
/// Probability at or above which a milestone is considered plausible.
pub const MEDIUM_PROBABILITY_PCT: f64 = 30.0;

/// Coarse likelihood bucket for a milestone probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    /// Classify a probability given in percent.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= HIGH_PROBABILITY_PCT {
            ProbabilityBand::High
        } else if percent >= MEDIUM_PROBABILITY_PCT {
            ProbabilityBand::Medium
        } else {
            ProbabilityBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProbabilityBand::High => "high",
            ProbabilityBand::Medium => "medium",
            ProbabilityBand::Low => "low",
        }
    }
}

/// Group an integer's digits in threes: `1234567` -> `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn whole_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Compact price label: `$1.25M`, `$115K`, `$950`.
pub fn format_price(price: Price) -> String {
    if price >= 1_000_000.0 {
        format!("${:.2}M", price / 1_000_000.0)
    } else if price >= 1_000.0 {
        format!("${}K", group_thousands((price / 1_000.0).round() as u64))
    } else {
        whole_dollars(price)
    }
}

/// Whole-dollar currency with thousands separators: `-$1,234`.
pub fn format_currency(amount: f64) -> String {
    whole_dollars(amount)
}

/// Rate as a percentage with two decimals: `0.0675` -> `6.75%`.
pub fn format_percent(rate: Rate) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Probability fraction as a percentage with one decimal: `0.4567` -> `45.7%`.
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
