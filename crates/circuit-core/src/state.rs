use std::collections::BTreeMap;

use serde::Serialize;

use crate::circuit::{CircuitData, ConnectionKind};
use crate::health::Finding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputState {
    #[default]
    Idle,
    ActiveDigital,
    ActivePwm,
    Transmitting,
    Connected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorValue {
    pub value: f64,
    pub unit: String,
    /// Simulation time of the last update [ms]
    pub updated_at: u64,
    /// Set once the reading has been sampled by a microcontroller
    pub adc_value: Option<u32>,
    /// Voltage the sampling microcontroller sees [V]
    pub voltage: Option<f64>,
}

impl SensorValue {
    pub fn new(value: f64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            updated_at: 0,
            adc_value: None,
            voltage: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputValue {
    pub state: OutputState,
    /// Current drawn by the output [mA]
    pub power_draw: f64,
    /// Component driving this output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driven_by: Option<String>,
    /// PWM duty cycle [%]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty_cycle: Option<f64>,
    /// PWM carrier frequency [Hz]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    /// Digital drive level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baud_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Current through a series passive [mA]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    /// Drop across a series passive [V]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_drop: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionKind>,
}

impl OutputValue {
    pub fn reset(&mut self) {
        *self = OutputValue::default();
    }
}

/// Mutable state of one simulation, owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    pub id: String,
    pub circuit: CircuitData,
    pub is_running: bool,
    /// Simulated time advanced so far [ms]
    pub elapsed_time: u64,
    /// Number of completed steps
    pub steps: u64,
    pub sensor_values: BTreeMap<String, SensorValue>,
    pub output_values: BTreeMap<String, OutputValue>,
    /// Derated total draw from the last step [mA]
    pub power_consumption: f64,
    pub warnings: Vec<Finding>,
    pub errors: Vec<Finding>,
    /// Wall clock at start [ms since UNIX epoch]
    pub started_at: u64,
    /// Wall clock at stop [ms since UNIX epoch]
    pub ended_at: Option<u64>,
}
