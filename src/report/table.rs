//! Plain-text rendering of simulation results.

use std::fmt::Write as _;

use super::format::{format_price, format_probability, ProbabilityBand};
use crate::simulation::milestones::MilestoneTable;
use crate::simulation::runner::SimulationRun;

/// One formatted milestone cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityCell {
    pub horizon_years: u32,
    pub text: String,
    pub band: ProbabilityBand,
}

/// Formatted cells of one milestone row.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneLine {
    pub milestone: String,
    pub cells: Vec<ProbabilityCell>,
}

/// Format every milestone row with its per-horizon probability bands.
pub fn milestone_lines(table: &MilestoneTable) -> Vec<MilestoneLine> {
    table
        .rows
        .iter()
        .map(|row| MilestoneLine {
            milestone: format_price(row.milestone),
            cells: row
                .probabilities
                .iter()
                .map(|p| ProbabilityCell {
                    horizon_years: p.horizon_years,
                    text: format_probability(p.probability),
                    band: ProbabilityBand::from_percent(p.percent()),
                })
                .collect(),
        })
        .collect()
}

/// Text summary of a run: headline stats, then the milestone table.
pub fn render_run(run: &SimulationRun) -> String {
    let mut out = String::new();
    for (years, stats) in run.summary() {
        let _ = writeln!(
            out,
            "{years:>2}y  median {:>9}  p10 {:>9}  p90 {:>9}",
            format_price(stats.median),
            format_price(stats.p10),
            format_price(stats.p90),
        );
    }

    let lines = milestone_lines(&run.milestones);
    if let Some(first) = lines.first() {
        let _ = write!(out, "\n{:>9}", "target");
        for cell in &first.cells {
            let _ = write!(out, " {:>7}", format!("{}y", cell.horizon_years));
        }
        out.push('\n');
    }
    for line in &lines {
        let _ = write!(out, "{:>9}", line.milestone);
        for cell in &line.cells {
            let _ = write!(out, " {:>7}", cell.text);
        }
        out.push('\n');
    }
    out
}
