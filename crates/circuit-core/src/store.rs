//! Concurrent simulation store
//!
//! The map lock is held only to look up, insert or remove an entry; each
//! simulation then has its own mutex, so steps on different ids never wait on
//! each other while every operation on one id is serialized.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::circuit::CircuitData;
use crate::config::EngineConfig;
use crate::engine::{Engine, Simulation};
use crate::error::{Result, SimError};
use crate::report::{circuit_analysis, CircuitAnalysis};
use crate::state::SimulationState;

#[derive(Debug)]
struct Slot {
    sim: Simulation,
    /// Set by cleanup so callers that raced the removal see NotFound
    retired: bool,
}

type SlotHandle = Arc<Mutex<Slot>>;

#[derive(Debug, Default)]
pub struct SimulationStore {
    engine: Engine,
    sims: RwLock<HashMap<String, SlotHandle>>,
}

impl SimulationStore {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: Engine::new(config),
            sims: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.engine.config
    }

    /// Start a simulation. A stopped simulation under the same id is replaced.
    ///
    /// The map lock is never held while waiting on a simulation's own lock or
    /// while the circuit is resolved; the insert only lands if the entry seen
    /// at the start is still the one in the map.
    pub fn start(&self, id: &str, circuit: CircuitData) -> Result<SimulationState> {
        let _span = tracing::info_span!("start", id).entered();
        let seen = self.find(id)?;
        if let Some(handle) = &seen {
            let slot = lock_slot(handle)?;
            if slot.sim.is_running() && !slot.retired {
                return Err(SimError::DuplicateSimulation(id.to_string()));
            }
        }

        let sim = self.engine.start(id, circuit)?;
        let state = sim.state.clone();
        let fresh = Arc::new(Mutex::new(Slot {
            sim,
            retired: false,
        }));

        let previous = {
            let mut sims = self.sims.write().map_err(|_| SimError::StoreUnavailable)?;
            match (sims.get(id), &seen) {
                (Some(current), Some(seen)) if Arc::ptr_eq(current, seen) => {}
                (Some(_), _) => return Err(SimError::DuplicateSimulation(id.to_string())),
                (None, _) => {}
            }
            sims.insert(id.to_string(), fresh)
        };
        if let Some(previous) = previous {
            retire(&previous);
        }
        Ok(state)
    }

    /// Step with the configured default step size.
    pub fn step_default(&self, id: &str) -> Result<SimulationState> {
        self.step(id, self.engine.config.default_step_ms)
    }

    pub fn step(&self, id: &str, dt_ms: u64) -> Result<SimulationState> {
        let _span = tracing::info_span!("step", id, dt_ms).entered();
        self.with_sim(id, |engine, sim| {
            engine.step(sim, dt_ms)?;
            Ok(sim.state.clone())
        })
    }

    pub fn stop(&self, id: &str) -> Result<SimulationState> {
        let _span = tracing::info_span!("stop", id).entered();
        self.with_sim(id, |engine, sim| {
            engine.stop(sim)?;
            Ok(sim.state.clone())
        })
    }

    pub fn get(&self, id: &str) -> Result<SimulationState> {
        self.with_sim(id, |_, sim| Ok(sim.state.clone()))
    }

    pub fn analysis(&self, id: &str) -> Result<CircuitAnalysis> {
        self.with_sim(id, |engine, sim| Ok(circuit_analysis(&sim.state, &engine.config)))
    }

    pub fn update_sensor_values(&self, id: &str, updates: &BTreeMap<String, f64>) -> Result<usize> {
        self.with_sim(id, |engine, sim| Ok(engine.update_sensors(sim, updates)))
    }

    /// Remove a simulation. Unknown ids are fine.
    ///
    /// Waits for an in-flight step on the same id to finish.
    pub fn cleanup(&self, id: &str) -> Result<()> {
        let _span = tracing::info_span!("cleanup", id).entered();
        let removed = {
            let mut sims = self.sims.write().map_err(|_| SimError::StoreUnavailable)?;
            sims.remove(id)
        };
        if let Some(handle) = removed {
            retire(&handle);
            tracing::info!(id, "simulation cleaned up");
        }
        Ok(())
    }

    /// Snapshot of every simulation that is still running, ordered by id.
    pub fn list_active(&self) -> Result<Vec<SimulationState>> {
        let mut active = Vec::new();
        for handle in self.handles()? {
            let slot = lock_slot(&handle)?;
            if !slot.retired && slot.sim.is_running() {
                active.push(slot.sim.state.clone());
            }
        }
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }

    pub fn len(&self) -> usize {
        match self.sims.read() {
            Ok(sims) => sims.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every simulation, returning how many there were.
    pub fn teardown(&self) -> Result<usize> {
        let drained: Vec<SlotHandle> = {
            let mut sims = self.sims.write().map_err(|_| SimError::StoreUnavailable)?;
            sims.drain().map(|(_, handle)| handle).collect()
        };
        for handle in &drained {
            retire(handle);
        }
        tracing::info!(count = drained.len(), "simulation store torn down");
        Ok(drained.len())
    }

    fn handles(&self) -> Result<Vec<SlotHandle>> {
        let sims = self.sims.read().map_err(|_| SimError::StoreUnavailable)?;
        Ok(sims.values().cloned().collect())
    }

    fn find(&self, id: &str) -> Result<Option<SlotHandle>> {
        let sims = self.sims.read().map_err(|_| SimError::StoreUnavailable)?;
        Ok(sims.get(id).cloned())
    }

    fn handle(&self, id: &str) -> Result<SlotHandle> {
        let sims = self.sims.read().map_err(|_| SimError::StoreUnavailable)?;
        sims.get(id)
            .cloned()
            .ok_or_else(|| SimError::NotFound(id.to_string()))
    }

    fn with_sim<T>(
        &self,
        id: &str,
        op: impl FnOnce(&Engine, &mut Simulation) -> Result<T>,
    ) -> Result<T> {
        let handle = self.handle(id)?;
        let mut slot = lock_slot(&handle)?;
        if slot.retired {
            return Err(SimError::NotFound(id.to_string()));
        }
        op(&self.engine, &mut slot.sim)
    }
}

fn lock_slot(handle: &SlotHandle) -> Result<MutexGuard<'_, Slot>> {
    handle.lock().map_err(|_| SimError::StoreUnavailable)
}

fn retire(handle: &SlotHandle) {
    match handle.lock() {
        Ok(mut slot) => slot.retired = true,
        Err(poisoned) => poisoned.into_inner().retired = true,
    }
}
