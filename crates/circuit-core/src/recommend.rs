//! Improvement suggestions derived from a simulation's current state.
//!
//! Every rule is checked independently, in a fixed order, and all matching
//! rules fire. The output keeps that order.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::health::{count_kind, FindingKind};
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    PowerOptimization,
    Connectivity,
    VoltageRegulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
}

pub fn recommend(state: &SimulationState, config: &EngineConfig) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if state.power_consumption > config.power_optimization_threshold_ma {
        let savings = state.power_consumption * config.estimated_savings_fraction;
        out.push(Recommendation {
            kind: RecommendationKind::PowerOptimization,
            priority: Priority::Medium,
            message: format!(
                "Circuit draws {:.2}mA. Sleep modes and switching idle peripherals off could save about {:.0}mA.",
                state.power_consumption, savings
            ),
        });
    }

    let unconnected = count_kind(&state.warnings, FindingKind::Unconnected);
    if unconnected > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::Connectivity,
            priority: Priority::High,
            message: format!(
                "{} component{} not connected. Wire them up or remove them from the design.",
                unconnected,
                if unconnected == 1 { " is" } else { "s are" }
            ),
        });
    }

    if count_kind(&state.warnings, FindingKind::VoltageMismatch) > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::VoltageRegulation,
            priority: Priority::High,
            message: "Supply and component voltages differ. Add a level shifter or a voltage regulator between them."
                .to_string(),
        });
    }

    out
}
