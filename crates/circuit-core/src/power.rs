//! Power distribution analysis
//!
//! Pure pass over a [`CircuitGraph`]: sums sink draw, checks every source's
//! rating against it, and pairs every source with every sink for voltage
//! compatibility. O(sources x sinks), fine for breadboard-sized circuits.

use serde::Serialize;

use crate::graph::{CircuitGraph, GraphNode};
use crate::health::{Finding, FindingKind};

/// Allowed |source - sink| voltage difference [V]
pub const VOLTAGE_TOLERANCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerRating {
    pub id: String,
    pub type_name: String,
    /// Nominal voltage [V]
    pub voltage: f64,
    /// Rated current [mA]
    pub current: f64,
}

impl PowerRating {
    fn of(node: &GraphNode) -> Self {
        Self {
            id: node.id().to_string(),
            type_name: node.spec.type_name.to_string(),
            voltage: node.spec.voltage,
            current: node.spec.current_draw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PowerAnalysis {
    /// Sum of sink current draw [mA]
    pub total_consumption: f64,
    pub sources: Vec<PowerRating>,
    pub sinks: Vec<PowerRating>,
    pub overloads: Vec<Finding>,
    pub voltage_mismatches: Vec<Finding>,
}

pub fn analyze(graph: &CircuitGraph) -> PowerAnalysis {
    analyze_with_tolerance(graph, VOLTAGE_TOLERANCE)
}

pub fn analyze_with_tolerance(graph: &CircuitGraph, tolerance: f64) -> PowerAnalysis {
    let sources: Vec<PowerRating> = graph.power_sources().map(PowerRating::of).collect();
    let sinks: Vec<PowerRating> = graph.power_sinks().map(PowerRating::of).collect();
    let total_consumption: f64 = sinks.iter().map(|sink| sink.current).sum();

    let mut overloads = Vec::new();
    let mut voltage_mismatches = Vec::new();

    for source in &sources {
        if total_consumption > source.current {
            overloads.push(Finding::new(
                FindingKind::PowerOverload,
                Some(source.id.as_str()),
                format!(
                    "{} ({}) is rated for {:.1}mA but the circuit draws {:.1}mA",
                    source.id, source.type_name, source.current, total_consumption
                ),
            ));
        }
        for sink in &sinks {
            let delta = (source.voltage - sink.voltage).abs();
            if delta > tolerance {
                voltage_mismatches.push(Finding::new(
                    FindingKind::VoltageMismatch,
                    Some(sink.id.as_str()),
                    format!(
                        "{} runs at {:.1}V but {} supplies {:.1}V",
                        sink.id, sink.voltage, source.id, source.voltage
                    ),
                ));
            }
        }
    }

    PowerAnalysis {
        total_consumption,
        sources,
        sinks,
        overloads,
        voltage_mismatches,
    }
}
