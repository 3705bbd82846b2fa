//! Circuit analysis report
//!
//! Aggregates a simulation snapshot into the summary returned by
//! `getCircuitAnalysis`, and renders it as plain text for the CLI.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use circuit_parts::{lookup, Category};

use crate::config::EngineConfig;
use crate::graph::CircuitGraph;
use crate::health::Finding;
use crate::recommend::{recommend, Recommendation};
use crate::state::{OutputValue, SensorValue, SimulationState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub id: String,
    pub is_running: bool,
    pub elapsed_time: u64,
    pub steps: u64,
    pub component_count: usize,
    pub connection_count: usize,
    pub power_consumption: f64,
    pub warning_count: usize,
    pub error_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub category: Option<Category>,
    pub connections: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitAnalysis {
    pub summary: Summary,
    pub components: Vec<ComponentEntry>,
    pub sensor_values: BTreeMap<String, SensorValue>,
    pub output_values: BTreeMap<String, OutputValue>,
    pub warnings: Vec<Finding>,
    pub errors: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
}

pub fn circuit_analysis(state: &SimulationState, config: &EngineConfig) -> CircuitAnalysis {
    let circuit = &state.circuit;
    let graph = CircuitGraph::build(&circuit.components, &circuit.connections);
    let components = circuit
        .components
        .iter()
        .map(|component| ComponentEntry {
            id: component.id.clone(),
            type_name: component.type_name.clone(),
            category: lookup(&component.type_name).ok().map(|spec| spec.category()),
            connections: graph.node(&component.id).map_or(0, |node| node.degree()),
        })
        .collect();

    CircuitAnalysis {
        summary: Summary {
            id: state.id.clone(),
            is_running: state.is_running,
            elapsed_time: state.elapsed_time,
            steps: state.steps,
            component_count: circuit.components.len(),
            connection_count: circuit.connections.len(),
            power_consumption: state.power_consumption,
            warning_count: state.warnings.len(),
            error_count: state.errors.len(),
        },
        components,
        sensor_values: state.sensor_values.clone(),
        output_values: state.output_values.clone(),
        warnings: state.warnings.clone(),
        errors: state.errors.clone(),
        recommendations: recommend(state, config),
    }
}

pub fn render_text(analysis: &CircuitAnalysis) -> String {
    let summary = &analysis.summary;
    let mut out = String::new();
    let _ = writeln!(out, "CIRCUIT_REPORT");
    let _ = writeln!(out, "id={}", summary.id);
    let _ = writeln!(out, "running={}", summary.is_running);
    let _ = writeln!(out, "elapsed_ms={} steps={}", summary.elapsed_time, summary.steps);
    let _ = writeln!(
        out,
        "components={} connections={}",
        summary.component_count, summary.connection_count
    );
    let _ = writeln!(out, "power_ma={:.2}", summary.power_consumption);

    out.push_str("sensors:\n");
    for (id, sensor) in &analysis.sensor_values {
        let _ = write!(out, "- {} {:.3} {}", id, sensor.value, sensor.unit);
        if let (Some(adc), Some(voltage)) = (sensor.adc_value, sensor.voltage) {
            let _ = write!(out, " adc={} v={:.3}", adc, voltage);
        }
        out.push('\n');
    }
    out.push_str("outputs:\n");
    for (id, output) in &analysis.output_values {
        let _ = writeln!(out, "- {} {:?} {:.2}mA", id, output.state, output.power_draw);
    }
    out.push_str("errors:\n");
    for finding in &analysis.errors {
        let _ = writeln!(out, "- {:?}: {}", finding.kind, finding.message);
    }
    out.push_str("warnings:\n");
    for finding in &analysis.warnings {
        let _ = writeln!(out, "- {:?}: {}", finding.kind, finding.message);
    }
    out.push_str("recommendations:\n");
    for rec in &analysis.recommendations {
        let _ = writeln!(out, "- [{:?}] {}", rec.priority, rec.message);
    }
    out
}

pub fn write_report_text(analysis: &CircuitAnalysis, path: &Path) -> std::io::Result<()> {
    fs::write(path, render_text(analysis))
}
