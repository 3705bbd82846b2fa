//! Per-connection transfer rules
//!
//! The effect of a connection depends only on the categories at its two
//! ends. `rule_for` is the dispatch table; `apply_transfer` carries out one
//! rule against the step's sensor and output maps.

use std::collections::BTreeMap;

use circuit_parts::Category;

use crate::circuit::Connection;
use crate::config::EngineConfig;
use crate::graph::{CircuitGraph, GraphNode};
use crate::state::{OutputState, OutputValue, SensorValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferRule {
    /// Microcontroller pin driving an actuator
    Drive,
    /// Microcontroller sampling a sensor through its ADC
    Sample,
    /// Microcontroller talking to a communication module
    Transmit,
    /// Series passive feeding a microcontroller or actuator
    OhmsLaw,
    /// Anything else: the destination is just marked connected
    Generic,
}

pub fn rule_for(from: Category, to: Category) -> TransferRule {
    use Category::*;
    match (from, to) {
        (Microcontroller, Actuator) => TransferRule::Drive,
        (Sensor, Microcontroller) => TransferRule::Sample,
        (Microcontroller, Communication) => TransferRule::Transmit,
        (Passive, Microcontroller | Actuator) => TransferRule::OhmsLaw,
        (Microcontroller, Microcontroller | Sensor | Passive)
        | (Sensor, Sensor | Actuator | Passive | Communication)
        | (Actuator, _)
        | (Passive, Sensor | Passive | Communication)
        | (Communication, _) => TransferRule::Generic,
    }
}

/// ADC conversion of a reading within `[min, max]`.
///
/// Returns the code, clamped to `0..=2^bits - 1`, and the voltage it
/// represents against `reference_voltage`.
pub fn sample_adc(value: f64, min: f64, max: f64, bits: u32, reference_voltage: f64) -> (u32, f64) {
    let max_adc = ((1u64 << bits) - 1) as f64;
    let span = max - min;
    let normalized = if span > 0.0 && value.is_finite() {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let adc = (normalized * max_adc).round().clamp(0.0, max_adc);
    let voltage = if max_adc > 0.0 {
        adc / max_adc * reference_voltage
    } else {
        0.0
    };
    (adc as u32, voltage)
}

/// Voltage lost across a series passive on one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLoss {
    pub voltage_drop: f64,
    /// Nominal voltage of the component behind the passive [V]
    pub nominal_voltage: f64,
}

pub struct TransferContext<'a> {
    pub graph: &'a CircuitGraph,
    pub config: &'a EngineConfig,
    pub sensors: &'a mut BTreeMap<String, SensorValue>,
    pub outputs: &'a mut BTreeMap<String, OutputValue>,
}

/// Apply the rule for `conn`. Returns the loss when the edge is lossy.
///
/// Connections whose endpoints are not in the graph are ignored.
pub fn apply_transfer(ctx: &mut TransferContext<'_>, conn: &Connection) -> Option<EdgeLoss> {
    let graph = ctx.graph;
    let from = graph.node(&conn.from.component)?;
    let to = graph.node(&conn.to.component)?;

    match rule_for(from.category(), to.category()) {
        TransferRule::Drive => {
            drive_actuator(ctx, from, to, &conn.from.pin);
            None
        }
        TransferRule::Sample => {
            sample_sensor(ctx, from, to);
            None
        }
        TransferRule::Transmit => {
            transmit(ctx, from, to);
            None
        }
        TransferRule::OhmsLaw => pass_through(ctx, from, to),
        TransferRule::Generic => {
            let output = ctx.outputs.entry(to.id().to_string()).or_default();
            if output.state == OutputState::Idle {
                output.state = OutputState::Connected;
            }
            output.connection = Some(conn.kind);
            None
        }
    }
}

fn drive_actuator(ctx: &mut TransferContext<'_>, mcu: &GraphNode, actuator: &GraphNode, pin: &str) {
    let output = ctx.outputs.entry(actuator.id().to_string()).or_default();
    if mcu.spec.is_pwm_pin(pin) {
        output.state = OutputState::ActivePwm;
        output.duty_cycle = Some(ctx.config.default_duty_cycle);
        output.frequency = Some(ctx.config.pwm_frequency_hz);
        output.level = None;
    } else {
        output.state = OutputState::ActiveDigital;
        output.level = Some(true);
        output.duty_cycle = None;
        output.frequency = None;
    }
    output.power_draw = actuator.spec.current_draw;
    output.driven_by = Some(mcu.id().to_string());
}

fn sample_sensor(ctx: &mut TransferContext<'_>, sensor: &GraphNode, mcu: &GraphNode) {
    let (Some(range), Some(adc)) = (sensor.spec.sensor(), mcu.spec.mcu()) else {
        return;
    };
    let Some(reading) = ctx.sensors.get_mut(sensor.id()) else {
        return;
    };
    let (code, voltage) = sample_adc(
        reading.value,
        range.min,
        range.max,
        adc.adc_resolution,
        mcu.spec.voltage,
    );
    reading.adc_value = Some(code);
    reading.voltage = Some(voltage);
}

fn transmit(ctx: &mut TransferContext<'_>, mcu: &GraphNode, module: &GraphNode) {
    let Some(comm) = module.spec.comm() else {
        return;
    };
    let output = ctx.outputs.entry(module.id().to_string()).or_default();
    output.state = OutputState::Transmitting;
    output.baud_rate = comm.baud_rates.first().copied();
    output.protocol = Some(comm.protocol.to_string());
    output.power_draw = module.spec.current_draw;
    output.driven_by = Some(mcu.id().to_string());
}

fn pass_through(ctx: &mut TransferContext<'_>, passive: &GraphNode, target: &GraphNode) -> Option<EdgeLoss> {
    let resistance = passive.spec.passive()?.resistance;
    if resistance <= 0.0 {
        return None;
    }
    let source_voltage = feeding_voltage(ctx.graph, passive).unwrap_or(target.spec.voltage);
    let current = source_voltage / resistance;
    let voltage_drop = current * resistance;

    let output = ctx.outputs.entry(target.id().to_string()).or_default();
    if output.state == OutputState::Idle {
        output.state = OutputState::Connected;
    }
    output.current = Some(round2(current * 1000.0));
    output.voltage_drop = Some(voltage_drop);

    Some(EdgeLoss {
        voltage_drop,
        nominal_voltage: target.spec.voltage,
    })
}

/// Highest nominal voltage among the components wired into `node`.
fn feeding_voltage(graph: &CircuitGraph, node: &GraphNode) -> Option<f64> {
    node.inbound
        .iter()
        .filter_map(|edge| graph.node(&edge.peer))
        .map(|peer| peer.spec.voltage)
        .filter(|voltage| *voltage > 0.0)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

/// Efficiency left after the given losses, each costing a tenth of its
/// relative drop.
pub fn efficiency(losses: &[EdgeLoss]) -> f64 {
    losses.iter().fold(1.0, |eff, loss| {
        if loss.nominal_voltage <= 0.0 {
            return eff;
        }
        let ratio = (loss.voltage_drop / loss.nominal_voltage).clamp(0.0, 1.0);
        eff * (1.0 - ratio * 0.1)
    })
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
