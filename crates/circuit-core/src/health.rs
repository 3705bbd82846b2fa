//! Health monitor
//!
//! Findings are diagnostic data collected after each step; none of them stop
//! a simulation.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::graph::CircuitGraph;
use crate::power::PowerAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    PowerOverload,
    VoltageMismatch,
    Unconnected,
    ExcessivePowerDraw,
    BrownoutRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub component: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn new(kind: FindingKind, component: Option<&str>, message: String) -> Self {
        Self {
            kind,
            component: component.map(str::to_string),
            message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthReport {
    pub warnings: Vec<Finding>,
    pub errors: Vec<Finding>,
}

/// Layer topology and power checks into one report.
///
/// `power_consumption` is the derated total from the step, not the raw sink
/// sum in `analysis`.
pub fn check_health(
    graph: &CircuitGraph,
    analysis: &PowerAnalysis,
    power_consumption: f64,
    config: &EngineConfig,
) -> HealthReport {
    let mut report = HealthReport::default();

    for node in graph.nodes() {
        if node.degree() == 0 {
            report.warnings.push(Finding::new(
                FindingKind::Unconnected,
                Some(node.id()),
                format!("{} ({}) is not connected to anything", node.id(), node.spec.display_name),
            ));
        }
    }

    report.errors.extend(analysis.overloads.iter().cloned());
    report
        .warnings
        .extend(analysis.voltage_mismatches.iter().cloned());

    if power_consumption > config.excessive_power_ma {
        report.errors.push(Finding::new(
            FindingKind::ExcessivePowerDraw,
            None,
            format!(
                "total draw {:.2}mA exceeds the {:.0}mA board limit",
                power_consumption, config.excessive_power_ma
            ),
        ));
    }

    for source in &analysis.sources {
        if power_consumption > source.current * config.brownout_factor {
            report.warnings.push(Finding::new(
                FindingKind::BrownoutRisk,
                Some(source.id.as_str()),
                format!(
                    "{} may brown out: {:.2}mA drawn against a {:.1}mA rating",
                    source.id, power_consumption, source.current
                ),
            ));
        }
    }

    report
}

pub fn count_kind(findings: &[Finding], kind: FindingKind) -> usize {
    findings.iter().filter(|finding| finding.kind == kind).count()
}
