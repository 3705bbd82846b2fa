//! Circuit description as supplied by callers.
//!
//! These are plain data; nothing here is resolved against the catalog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A placed component. Placement fields are carried through unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl ComponentInstance {
    pub fn new(id: &str, type_name: &str) -> Self {
        Self {
            id: id.to_string(),
            type_name: type_name.to_string(),
            position: None,
            rotation: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    #[default]
    Wire,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Wire => "wire",
        }
    }
}

/// One end of a connection: component id plus pin reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub component: String,
    pub pin: String,
}

/// Directed edge `from -> to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: Endpoint,
    pub to: Endpoint,
    #[serde(default)]
    pub kind: ConnectionKind,
}

impl Connection {
    pub fn wire(from: &str, from_pin: &str, to: &str, to_pin: &str) -> Self {
        Self {
            from: Endpoint {
                component: from.to_string(),
                pin: from_pin.to_string(),
            },
            to: Endpoint {
                component: to.to_string(),
                pin: to_pin.to_string(),
            },
            kind: ConnectionKind::Wire,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitData {
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl CircuitData {
    pub fn new(components: Vec<ComponentInstance>, connections: Vec<Connection>) -> Self {
        Self {
            components,
            connections,
        }
    }
}
