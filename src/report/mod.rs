//! Human-readable output.

pub mod format;
pub mod table;

pub use format::{
    format_currency, format_percent, format_price, format_probability, ProbabilityBand,
};
pub use table::{milestone_lines, render_run, MilestoneLine, ProbabilityCell};
