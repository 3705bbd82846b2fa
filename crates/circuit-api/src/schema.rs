use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use circuit_core::{CircuitData, SimulationState};

/// Body of `POST /v1/simulations/{id}/start`
pub type StartRequest = CircuitData;

#[derive(Debug, Default, Deserialize)]
pub struct StepRequest {
    pub time_step_ms: Option<u64>,
}

/// Body of `PUT /v1/simulations/{id}/sensors`: component id -> reading
pub type SensorUpdateRequest = BTreeMap<String, f64>;

#[derive(Debug, Serialize)]
pub struct SensorUpdateResponse {
    pub applied: usize,
}

#[derive(Debug, Serialize)]
pub struct SimulationList {
    pub simulations: Vec<SimulationState>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}
