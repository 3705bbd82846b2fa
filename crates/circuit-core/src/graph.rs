//! Circuit graph builder
//!
//! Resolves placed components against the catalog and records each
//! connection as an outbound edge on its source and an inbound edge on its
//! destination. Building is best-effort: components of unknown type and
//! connections naming an unknown component id are skipped, counted, and
//! logged, never fatal.

use std::collections::HashMap;

use circuit_parts::{lookup, Category, ComponentSpec};

use crate::circuit::{ComponentInstance, Connection, ConnectionKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Component id at the other end
    pub peer: String,
    /// Pin on this node
    pub pin: String,
    /// Pin on the peer
    pub peer_pin: String,
    pub kind: ConnectionKind,
}

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub instance: ComponentInstance,
    pub spec: &'static ComponentSpec,
    pub outbound: Vec<Edge>,
    pub inbound: Vec<Edge>,
    pub is_power_source: bool,
    pub is_power_sink: bool,
}

impl GraphNode {
    fn new(instance: ComponentInstance, spec: &'static ComponentSpec) -> Self {
        let category = spec.category();
        Self {
            instance,
            spec,
            outbound: Vec::new(),
            inbound: Vec::new(),
            is_power_source: category == Category::Microcontroller,
            is_power_sink: matches!(category, Category::Actuator | Category::Sensor),
        }
    }

    pub fn id(&self) -> &str {
        &self.instance.id
    }

    pub fn category(&self) -> Category {
        self.spec.category()
    }

    pub fn degree(&self) -> usize {
        self.outbound.len() + self.inbound.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CircuitGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
    /// Components whose type is not in the catalog
    pub unresolved_components: Vec<String>,
    /// Connections dropped because an endpoint id was unknown
    pub skipped_connections: usize,
}

impl CircuitGraph {
    /// Build a graph from placed components and their connections.
    pub fn build(components: &[ComponentInstance], connections: &[Connection]) -> Self {
        let mut graph = CircuitGraph::default();

        for instance in components {
            if graph.index.contains_key(&instance.id) {
                tracing::debug!(id = %instance.id, "duplicate component id ignored");
                continue;
            }
            match lookup(&instance.type_name) {
                Ok(spec) => {
                    graph.index.insert(instance.id.clone(), graph.nodes.len());
                    graph.nodes.push(GraphNode::new(instance.clone(), spec));
                }
                Err(err) => {
                    tracing::debug!(id = %instance.id, %err, "component left out of graph");
                    graph.unresolved_components.push(instance.id.clone());
                }
            }
        }

        for conn in connections {
            let (Some(&from), Some(&to)) = (
                graph.index.get(&conn.from.component),
                graph.index.get(&conn.to.component),
            ) else {
                tracing::debug!(
                    from = %conn.from.component,
                    to = %conn.to.component,
                    "connection references unknown component, skipped"
                );
                graph.skipped_connections += 1;
                continue;
            };
            graph.nodes[from].outbound.push(Edge {
                peer: conn.to.component.clone(),
                pin: conn.from.pin.clone(),
                peer_pin: conn.to.pin.clone(),
                kind: conn.kind,
            });
            graph.nodes[to].inbound.push(Edge {
                peer: conn.from.component.clone(),
                pin: conn.to.pin.clone(),
                peer_pin: conn.from.pin.clone(),
                kind: conn.kind,
            });
        }

        graph
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Nodes in component order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.outbound.len()).sum()
    }

    pub fn power_sources(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|node| node.is_power_source)
    }

    pub fn power_sinks(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|node| node.is_power_sink)
    }
}

pub fn debug_dump_graph(graph: &CircuitGraph) {
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped = graph.skipped_connections,
        "circuit graph"
    );
}
