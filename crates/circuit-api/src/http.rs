use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use circuit_core::{EngineConfig, SimError, SimulationStore};

use crate::schema::{
    ErrorBody, ErrorResponse, SensorUpdateRequest, SensorUpdateResponse, SimulationList,
    StartRequest, StepRequest,
};

pub struct HttpServerConfig {
    pub bind_addr: String,
    pub engine: EngineConfig,
}

#[derive(Clone)]
pub struct ApiState {
    store: Arc<SimulationStore>,
}

impl ApiState {
    pub fn new(store: Arc<SimulationStore>) -> Self {
        Self { store }
    }
}

pub async fn run(config: HttpServerConfig) -> Result<(), String> {
    let store = Arc::new(SimulationStore::new(config.engine));
    let app = build_router(ApiState::new(Arc::clone(&store)));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|err| format!("bind {} failed: {}", config.bind_addr, err))?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {}", err))?;
    let dropped = store.teardown().map_err(|err| err.to_string())?;
    tracing::info!(dropped, "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/catalog", get(get_catalog))
        .route("/v1/simulations", get(list_simulations))
        .route(
            "/v1/simulations/{id}",
            get(get_simulation).delete(cleanup_simulation),
        )
        .route("/v1/simulations/{id}/start", post(start_simulation))
        .route("/v1/simulations/{id}/step", post(step_simulation))
        .route("/v1/simulations/{id}/stop", post(stop_simulation))
        .route("/v1/simulations/{id}/analysis", get(get_analysis))
        .route("/v1/simulations/{id}/sensors", put(update_sensors))
        .with_state(state)
}

async fn get_catalog() -> Response {
    Json(circuit_parts::catalog()).into_response()
}

async fn list_simulations(State(state): State<ApiState>) -> Response {
    match state.store.list_active() {
        Ok(simulations) => Json(SimulationList { simulations }).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn start_simulation(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<StartRequest>,
) -> Response {
    match state.store.start(&id, payload) {
        Ok(sim) => (StatusCode::CREATED, Json(sim)).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn step_simulation(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(params): Query<StepRequest>,
) -> Response {
    let dt = params
        .time_step_ms
        .unwrap_or(state.store.config().default_step_ms);
    match state.store.step(&id, dt) {
        Ok(sim) => Json(sim).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn stop_simulation(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.stop(&id) {
        Ok(sim) => Json(sim).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn get_simulation(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Ok(sim) => Json(sim).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn get_analysis(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.analysis(&id) {
        Ok(analysis) => Json(analysis).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn update_sensors(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(updates): Json<SensorUpdateRequest>,
) -> Response {
    match state.store.update_sensor_values(&id, &updates) {
        Ok(applied) => Json(SensorUpdateResponse { applied }).into_response(),
        Err(err) => sim_error(err),
    }
}

async fn cleanup_simulation(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.cleanup(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => sim_error(err),
    }
}

fn sim_error(err: SimError) -> Response {
    let (status, code) = match &err {
        SimError::NotFound(_) => (StatusCode::NOT_FOUND, "SIMULATION_NOT_FOUND"),
        SimError::DuplicateSimulation(_) => (StatusCode::CONFLICT, "DUPLICATE_SIMULATION"),
        SimError::NotRunning(_) => (StatusCode::CONFLICT, "NOT_RUNNING"),
        SimError::UnknownComponentType(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_COMPONENT_TYPE"),
        SimError::StoreUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
    };
    api_error(status, code, &err.to_string(), None)
}

fn api_error(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<Vec<String>>,
) -> Response {
    let body = ErrorResponse {
        error: ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
            details,
        },
    };
    (status, Json(body)).into_response()
}
