use circuit_core::health::{check_health, count_kind};
use circuit_core::{
    analyze, CircuitData, CircuitGraph, ComponentInstance, Connection, EngineConfig, FindingKind,
    SimulationStore,
};

#[test]
fn unconnected_components_warned_after_step() {
    let store = SimulationStore::new(EngineConfig::default());
    let circuit = CircuitData::new(
        vec![
            ComponentInstance::new("mcu", "arduino_uno"),
            ComponentInstance::new("led1", "led"),
        ],
        Vec::new(),
    );
    store.start("u", circuit).unwrap();
    let state = store.step("u", 100).unwrap();
    assert_eq!(count_kind(&state.warnings, FindingKind::Unconnected), 2);
    assert_eq!(state.warnings.len(), 2);
}

#[test]
fn findings_are_recomputed_not_accumulated() {
    let store = SimulationStore::new(EngineConfig::default());
    let circuit = CircuitData::new(vec![ComponentInstance::new("led1", "led")], Vec::new());
    store.start("u", circuit).unwrap();
    store.step("u", 100).unwrap();
    let state = store.step("u", 100).unwrap();
    assert_eq!(count_kind(&state.warnings, FindingKind::Unconnected), 1);
}

#[test]
fn brownout_when_draw_exceeds_twice_rating() {
    let components = vec![
        ComponentInstance::new("mcu", "arduino_uno"),
        ComponentInstance::new("servo", "servo_sg90"),
    ];
    let connections = vec![Connection::wire("mcu", "D9", "servo", "signal")];
    let graph = CircuitGraph::build(&components, &connections);
    let analysis = analyze(&graph);
    let config = EngineConfig::default();

    let report = check_health(&graph, &analysis, 100.0, &config);
    assert_eq!(count_kind(&report.warnings, FindingKind::BrownoutRisk), 0);

    let report = check_health(&graph, &analysis, 100.01, &config);
    assert_eq!(count_kind(&report.warnings, FindingKind::BrownoutRisk), 1);
    assert_eq!(count_kind(&report.errors, FindingKind::PowerOverload), 1);
}

#[test]
fn excessive_draw_and_overload_both_fire() {
    let mut components = vec![ComponentInstance::new("mcu", "arduino_uno")];
    let mut connections = Vec::new();
    for i in 0..5 {
        let id = format!("m{}", i);
        components.push(ComponentInstance::new(&id, "dc_motor"));
        connections.push(Connection::wire("mcu", &format!("D{}", i + 2), &id, "+"));
    }
    let store = SimulationStore::new(EngineConfig::default());
    store
        .start("big", CircuitData::new(components, connections))
        .unwrap();
    let state = store.step("big", 100).unwrap();
    assert_eq!(state.power_consumption, 1250.0);
    assert_eq!(count_kind(&state.errors, FindingKind::ExcessivePowerDraw), 1);
    assert_eq!(count_kind(&state.errors, FindingKind::PowerOverload), 1);
    assert_eq!(count_kind(&state.warnings, FindingKind::BrownoutRisk), 1);
    // dc_motor runs at 6V against a 5V board
    assert_eq!(count_kind(&state.warnings, FindingKind::VoltageMismatch), 5);
    assert!(state.is_running);
}

#[test]
fn healthy_circuit_has_no_findings() {
    let components = vec![
        ComponentInstance::new("mcu", "arduino_uno"),
        ComponentInstance::new("led1", "led"),
    ];
    let connections = vec![Connection::wire("mcu", "D9", "led1", "anode")];
    let graph = CircuitGraph::build(&components, &connections);
    let analysis = analyze(&graph);
    let report = check_health(&graph, &analysis, 20.0, &EngineConfig::default());
    assert!(report.warnings.is_empty());
    assert!(report.errors.is_empty());
}
