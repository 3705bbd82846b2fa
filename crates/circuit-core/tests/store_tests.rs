use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

use circuit_core::{CircuitData, ComponentInstance, Connection, EngineConfig, SimError, SimulationStore};

fn store() -> SimulationStore {
    SimulationStore::new(EngineConfig::with_seed(3))
}

fn demo_circuit() -> CircuitData {
    CircuitData::new(
        vec![
            ComponentInstance::new("mcu", "arduino_uno"),
            ComponentInstance::new("led1", "led"),
            ComponentInstance::new("ldr", "photoresistor"),
        ],
        vec![
            Connection::wire("mcu", "D9", "led1", "anode"),
            Connection::wire("ldr", "out", "mcu", "A0"),
        ],
    )
}

#[test]
fn step_unknown_simulation_is_not_found() {
    let store = store();
    assert_eq!(store.step("nope", 100).unwrap_err(), SimError::NotFound("nope".to_string()));
    assert_eq!(store.get("nope").unwrap_err(), SimError::NotFound("nope".to_string()));
    assert_eq!(store.stop("nope").unwrap_err(), SimError::NotFound("nope".to_string()));
    assert!(store.is_empty());
}

#[test]
fn duplicate_start_is_rejected_while_running() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    store.step("a", 100).unwrap();
    assert_eq!(
        store.start("a", demo_circuit()).unwrap_err(),
        SimError::DuplicateSimulation("a".to_string())
    );
    // the running simulation is untouched
    assert_eq!(store.get("a").unwrap().elapsed_time, 100);
}

#[test]
fn stopped_simulation_can_be_restarted() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    store.step("a", 100).unwrap();
    store.stop("a").unwrap();
    let restarted = store.start("a", demo_circuit()).unwrap();
    assert!(restarted.is_running);
    assert_eq!(restarted.elapsed_time, 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn stop_keeps_state_and_blocks_steps() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    store.step("a", 100).unwrap();
    let stopped = store.stop("a").unwrap();
    assert!(!stopped.is_running);
    assert!(stopped.ended_at.is_some());

    assert_eq!(store.step("a", 100).unwrap_err(), SimError::NotRunning("a".to_string()));
    assert_eq!(store.stop("a").unwrap_err(), SimError::NotRunning("a".to_string()));
    assert_eq!(store.get("a").unwrap(), stopped);
}

#[test]
fn cleanup_removes_simulation_and_is_idempotent() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    store.cleanup("a").unwrap();
    assert_eq!(store.get("a").unwrap_err(), SimError::NotFound("a".to_string()));
    store.cleanup("a").unwrap();
    store.cleanup("never-existed").unwrap();
    assert!(store.is_empty());
}

#[test]
fn list_active_skips_stopped_simulations() {
    let store = store();
    store.start("b", demo_circuit()).unwrap();
    store.start("a", demo_circuit()).unwrap();
    store.start("c", demo_circuit()).unwrap();
    store.stop("c").unwrap();
    let ids: Vec<String> = store.list_active().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn default_step_uses_configured_size() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    let state = store.step_default("a").unwrap();
    assert_eq!(state.elapsed_time, 100);
}

#[test]
fn update_sensor_values_overrides_readings() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    let mut updates = BTreeMap::new();
    updates.insert("ldr".to_string(), 42.0);
    assert_eq!(store.update_sensor_values("a", &updates).unwrap(), 1);
    assert_eq!(store.get("a").unwrap().sensor_values["ldr"].value, 42.0);
    assert_eq!(
        store.update_sensor_values("zzz", &updates).unwrap_err(),
        SimError::NotFound("zzz".to_string())
    );
}

#[test]
fn teardown_drops_everything() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    store.start("b", demo_circuit()).unwrap();
    assert_eq!(store.teardown().unwrap(), 2);
    assert!(store.is_empty());
    assert!(store.list_active().unwrap().is_empty());
}

#[test]
fn analysis_reports_current_state() {
    let store = store();
    store.start("a", demo_circuit()).unwrap();
    store.step("a", 100).unwrap();
    let analysis = store.analysis("a").unwrap();
    assert_eq!(analysis.summary.component_count, 3);
    assert_eq!(analysis.summary.connection_count, 2);
    assert_eq!(analysis.summary.elapsed_time, 100);
    assert_eq!(analysis.components.len(), 3);
}

#[test]
fn concurrent_steps_on_distinct_ids() {
    let store = Arc::new(store());
    let ids: Vec<String> = (0..4).map(|i| format!("sim-{}", i)).collect();
    for id in &ids {
        store.start(id, demo_circuit()).unwrap();
    }
    thread::scope(|scope| {
        for id in &ids {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..50 {
                    store.step(id, 10).unwrap();
                }
            });
        }
    });
    for id in &ids {
        let state = store.get(id).unwrap();
        assert_eq!(state.elapsed_time, 500);
        assert_eq!(state.steps, 50);
    }
}

#[test]
fn concurrent_steps_on_one_id_are_serialized() {
    let store = Arc::new(store());
    store.start("shared", demo_circuit()).unwrap();
    thread::scope(|scope| {
        for _ in 0..4 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..25 {
                    store.step("shared", 10).unwrap();
                }
            });
        }
    });
    let state = store.get("shared").unwrap();
    assert_eq!(state.steps, 100);
    assert_eq!(state.elapsed_time, 1000);
}

#[test]
fn racing_starts_on_one_id_admit_exactly_one() {
    let store = Arc::new(store());
    let barrier = Barrier::new(8);
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    store.start("shared", demo_circuit())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let started = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(started, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(
            result.as_ref().unwrap_err(),
            &SimError::DuplicateSimulation("shared".to_string())
        );
    }
    assert_eq!(store.len(), 1);
}

fn heavy_circuit() -> CircuitData {
    let mut components = Vec::new();
    for i in 0..400 {
        components.push(ComponentInstance::new(&format!("mcu{}", i), "arduino_uno"));
    }
    for i in 0..4000 {
        components.push(ComponentInstance::new(&format!("baro{}", i), "bmp280"));
    }
    CircuitData::new(components, Vec::new())
}

#[test]
fn start_on_busy_id_does_not_block_other_ids() {
    let store = Arc::new(store());
    store.start("big", heavy_circuit()).unwrap();
    store.start("small", demo_circuit()).unwrap();

    let began = Instant::now();
    store.step("big", 10).unwrap();
    let step_cost = began.elapsed();
    let pause = step_cost / 10 + Duration::from_millis(1);

    thread::scope(|scope| {
        let stepper = {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                store.step("big", 10).unwrap();
                Instant::now()
            })
        };
        thread::sleep(pause);
        let starter = {
            let store = Arc::clone(&store);
            scope.spawn(move || store.start("big", heavy_circuit()))
        };
        thread::sleep(pause);

        store.get("small").unwrap();
        store.step("small", 10).unwrap();
        let served_at = Instant::now();

        let step_done_at = stepper.join().unwrap();
        assert!(served_at < step_done_at);
        assert_eq!(
            starter.join().unwrap().unwrap_err(),
            SimError::DuplicateSimulation("big".to_string())
        );
    });
    assert_eq!(store.get("big").unwrap().steps, 2);
}
