use serde::Serialize;

use crate::{
    discipline::Discipline,
    quantities::{Float, Rate, TimeSpan},
};

/// Per-source counters, mutated only by the arrival and departure handlers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceStats {
    pub generated: u64,
    pub transmitted: u64,
    pub dropped: u64,
    pub bytes_transmitted: Float,
    pub total_delay: TimeSpan,
}

/// Jain's fairness index `(Σx)² / (N · Σx²)`, or 0 when every share is zero.
#[must_use]
pub fn jain(shares: &[Float]) -> Float {
    let sum: Float = shares.iter().sum();
    let sum_sq: Float = shares.iter().map(|x| x * x).sum();
    if sum_sq > 0. {
        sum * sum / (shares.len() as Float * sum_sq)
    } else {
        0.
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetrics {
    pub utilization: Float,
    pub average_delay: Float,
    pub drop_probability: Float,
    pub fairness: Float,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub source: usize,
    pub weight: Float,
    pub generated: u64,
    pub transmitted: u64,
    pub dropped: u64,
    pub drop_rate: Float,
    pub average_delay: Float,
    pub throughput: Float,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResults {
    pub discipline: String,
    pub metrics: SystemMetrics,
    pub sources: Vec<SourceReport>,
}

fn ratio(numerator: Float, denominator: Float) -> Float {
    if denominator > 0. {
        numerator / denominator
    } else {
        0.
    }
}

/// Reduces the per-source counters to the final report. The fairness share is
/// discipline-specific: raw throughput for FCFS, weight-normalized for WFQ.
#[must_use]
pub fn reduce<D: Discipline>(
    stats: &[SourceStats],
    weights: &[Float],
    capacity: Rate,
    horizon: TimeSpan,
) -> SimulationResults {
    let total_generated: u64 = stats.iter().map(|s| s.generated).sum();
    let total_transmitted: u64 = stats.iter().map(|s| s.transmitted).sum();
    let total_dropped: u64 = stats.iter().map(|s| s.dropped).sum();
    let total_bytes: Float = stats.iter().map(|s| s.bytes_transmitted).sum();
    let total_delay: Float = stats.iter().map(|s| s.total_delay.seconds()).sum();

    let shares: Vec<Float> = stats
        .iter()
        .zip(weights)
        .map(|(s, &w)| D::fairness_share(s.bytes_transmitted, w))
        .collect();

    let metrics = SystemMetrics {
        utilization: total_bytes / (capacity.value() * horizon.seconds()),
        average_delay: ratio(total_delay, total_transmitted as Float),
        drop_probability: ratio(total_dropped as Float, total_generated as Float),
        fairness: jain(&shares),
    };

    let sources = stats
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(source, (s, &weight))| SourceReport {
            source,
            weight,
            generated: s.generated,
            transmitted: s.transmitted,
            dropped: s.dropped,
            drop_rate: ratio(s.dropped as Float, s.generated as Float),
            average_delay: ratio(s.total_delay.seconds(), s.transmitted as Float),
            throughput: s.bytes_transmitted / horizon.seconds(),
        })
        .collect();

    SimulationResults {
        discipline: D::NAME.to_owned(),
        metrics,
        sources,
    }
}
