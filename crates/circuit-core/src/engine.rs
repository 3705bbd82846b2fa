use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use circuit_parts::{lookup, Category};

use crate::circuit::CircuitData;
use crate::config::EngineConfig;
use crate::error::{Result, SimError};
use crate::graph::{debug_dump_graph, CircuitGraph};
use crate::health::check_health;
use crate::power::analyze_with_tolerance;
use crate::state::{OutputValue, SensorValue, SimulationState};
use crate::transfer::{apply_transfer, efficiency, round2, EdgeLoss, TransferContext};

/// One simulation: its state plus the noise generator that belongs to it.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: SimulationState,
    rng: ChaCha8Rng,
}

impl Simulation {
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }
}

/// Stateless driver for the start/step/stop lifecycle.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create a running simulation for `circuit`.
    ///
    /// Every component type must be in the catalog.
    pub fn start(&self, id: &str, circuit: CircuitData) -> Result<Simulation> {
        let mut sensor_values = BTreeMap::new();
        let mut output_values = BTreeMap::new();

        for component in &circuit.components {
            let spec = lookup(&component.type_name)?;
            match spec.category() {
                Category::Sensor => {
                    if let Some(sensor) = spec.sensor() {
                        sensor_values.insert(
                            component.id.clone(),
                            SensorValue::new(sensor.default_value, sensor.unit),
                        );
                    }
                }
                Category::Actuator | Category::Communication => {
                    output_values.insert(component.id.clone(), OutputValue::default());
                }
                Category::Microcontroller | Category::Passive => {}
            }
        }

        tracing::info!(
            id,
            components = circuit.components.len(),
            connections = circuit.connections.len(),
            "simulation started"
        );

        Ok(Simulation {
            state: SimulationState {
                id: id.to_string(),
                circuit,
                is_running: true,
                elapsed_time: 0,
                steps: 0,
                sensor_values,
                output_values,
                power_consumption: 0.0,
                warnings: Vec::new(),
                errors: Vec::new(),
                started_at: now_ms(),
                ended_at: None,
            },
            rng: ChaCha8Rng::seed_from_u64(self.config.seed ^ fnv1a(id)),
        })
    }

    /// Advance a running simulation by `dt_ms`.
    ///
    /// Nothing is touched when the simulation is stopped.
    pub fn step(&self, sim: &mut Simulation, dt_ms: u64) -> Result<()> {
        if !sim.state.is_running {
            return Err(SimError::NotRunning(sim.state.id.clone()));
        }
        let config = &self.config;
        let now = sim.state.elapsed_time.saturating_add(dt_ms);

        let circuit = &sim.state.circuit;
        let graph = CircuitGraph::build(&circuit.components, &circuit.connections);
        debug_dump_graph(&graph);
        let analysis = analyze_with_tolerance(&graph, config.voltage_tolerance);

        let mut sensors = sim.state.sensor_values.clone();
        for (id, reading) in sensors.iter_mut() {
            let factor = 1.0 + sim.rng.gen_range(-config.noise_fraction..=config.noise_fraction);
            let mut value = reading.value * factor;
            if let Some(range) = graph.node(id).and_then(|node| node.spec.sensor()) {
                value = value.clamp(range.min, range.max);
            }
            reading.value = value;
            reading.updated_at = now;
            reading.adc_value = None;
            reading.voltage = None;
        }

        let mut outputs = sim.state.output_values.clone();
        outputs.values_mut().for_each(OutputValue::reset);

        let mut losses: Vec<EdgeLoss> = Vec::new();
        {
            let mut ctx = TransferContext {
                graph: &graph,
                config,
                sensors: &mut sensors,
                outputs: &mut outputs,
            };
            for conn in &circuit.connections {
                if let Some(loss) = apply_transfer(&mut ctx, conn) {
                    losses.push(loss);
                }
            }
        }

        let eff = efficiency(&losses).max(f64::EPSILON);
        let power = round2(analysis.total_consumption / eff).max(0.0);
        let health = check_health(&graph, &analysis, power, config);

        tracing::debug!(power, efficiency = eff, lossy_edges = losses.len(), "step totals");
        if !health.errors.is_empty() {
            tracing::warn!(errors = health.errors.len(), "circuit reports errors");
        }

        let state = &mut sim.state;
        state.sensor_values = sensors;
        state.output_values = outputs;
        state.power_consumption = power;
        state.warnings = health.warnings;
        state.errors = health.errors;
        state.elapsed_time = now;
        state.steps += 1;
        Ok(())
    }

    /// Mark a simulation stopped. State is kept until cleanup.
    pub fn stop(&self, sim: &mut Simulation) -> Result<()> {
        if !sim.state.is_running {
            return Err(SimError::NotRunning(sim.state.id.clone()));
        }
        sim.state.is_running = false;
        sim.state.ended_at = Some(now_ms());
        tracing::info!(id = %sim.state.id, elapsed_ms = sim.state.elapsed_time, "simulation stopped");
        Ok(())
    }

    /// Operator override of sensor readings; ids that are not sensors of this
    /// circuit are ignored. Returns how many readings changed.
    pub fn update_sensors(&self, sim: &mut Simulation, updates: &BTreeMap<String, f64>) -> usize {
        let mut applied = 0;
        for (id, value) in updates {
            match sim.state.sensor_values.get_mut(id) {
                Some(reading) => {
                    reading.value = *value;
                    reading.updated_at = sim.state.elapsed_time;
                    applied += 1;
                }
                None => tracing::debug!(id = %id, "sensor override for unknown sensor ignored"),
            }
        }
        applied
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Stable 64-bit FNV-1a, used to give each simulation id its own stream.
fn fnv1a(text: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
