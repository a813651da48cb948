use itertools::Itertools;

use crate::stats::{SimulationResults, SourceReport};

const RULE_WIDTH: usize = 98;

fn row(s: &SourceReport) -> String {
    format!(
        "{:>3} | {:>6} | {:>10} | {:>12} | {:>11} | {:>9.4} | {:>13.6} | {:>13.2}",
        s.source,
        s.weight,
        s.generated,
        s.transmitted,
        s.dropped,
        s.drop_rate,
        s.average_delay,
        s.throughput,
    )
}

/// Renders the full report block; callers fan it out to stdout and the output
/// file.
#[must_use]
pub fn render(results: &SimulationResults) -> String {
    let m = &results.metrics;
    let rule = "-".repeat(RULE_WIDTH);
    let rows = results.sources.iter().map(row).join("\n");
    format!(
        "## System-Level Performance Metrics ({name})\n\
         1. Server Utilization:   {:.6}\n\
         2. Avg. Packet Delay:    {:.6} s\n\
         3. Packet Drop Prob.:    {:.6}\n\
         4. Fairness Index:       {:.6}\n\
         \n\
         ## Per-Source Statistics\n\
         {rule}\n\
         Src | Weight | Gen'd Pkts | Trans'd Pkts | Drop'd Pkts | Drop Rate | Avg Delay (s) | Thruput (B/s)\n\
         {rule}\n\
         {rows}\n\
         {rule}\n",
        m.utilization,
        m.average_delay,
        m.drop_probability,
        m.fairness,
        name = results.discipline.to_uppercase(),
    )
}
