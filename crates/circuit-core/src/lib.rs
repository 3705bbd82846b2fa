//! Behavioral circuit simulation and power analysis.
//!
//! A coarse, rule-based model of maker-board circuits: components from the
//! `circuit-parts` catalog are wired into a graph, power is budgeted per
//! source, and each step propagates signals along connections according to
//! the categories at either end.
//!
//! ```
//! use circuit_core::{CircuitData, ComponentInstance, Connection, EngineConfig, SimulationStore};
//!
//! let store = SimulationStore::new(EngineConfig::with_seed(7));
//! let circuit = CircuitData::new(
//!     vec![
//!         ComponentInstance::new("mcu", "arduino_uno"),
//!         ComponentInstance::new("led1", "led"),
//!     ],
//!     vec![Connection::wire("mcu", "D9", "led1", "anode")],
//! );
//! store.start("demo", circuit).unwrap();
//! let state = store.step("demo", 100).unwrap();
//! assert_eq!(state.elapsed_time, 100);
//! ```

pub mod circuit;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod health;
pub mod power;
pub mod recommend;
pub mod report;
pub mod state;
pub mod store;
pub mod transfer;

pub use circuit::{CircuitData, ComponentInstance, Connection, ConnectionKind, Endpoint, Position};
pub use config::EngineConfig;
pub use engine::{Engine, Simulation};
pub use error::{Result, SimError};
pub use graph::CircuitGraph;
pub use health::{Finding, FindingKind, HealthReport};
pub use power::{analyze, PowerAnalysis};
pub use recommend::{Priority, Recommendation, RecommendationKind};
pub use report::CircuitAnalysis;
pub use state::{OutputState, OutputValue, SensorValue, SimulationState};
pub use store::SimulationStore;
