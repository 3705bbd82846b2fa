//! Component specification table
//!
//! Static catalog of the maker-board parts the simulator understands:
//! microcontrollers, sensors, actuators, passives and communication modules.
//!
//! ## Module Structure
//!
//! - `types`: Category/interface enums and per-category attributes
//! - `catalog`: The curated table and `lookup`
//!
//! ## Usage
//!
//! ```
//! use circuit_parts::{lookup, Category};
//!
//! let uno = lookup("arduino_uno").unwrap();
//! assert_eq!(uno.category(), Category::Microcontroller);
//! assert!(lookup("tesla_coil").is_err());
//! ```

pub mod catalog;
pub mod types;

pub use catalog::{catalog, lookup, UnknownComponentType};
pub use types::{
    normalize_pin, ActuatorAttrs, Attributes, Category, CommAttrs, ComponentSpec, InterfaceKind,
    McuAttrs, PassiveAttrs, SensorAttrs,
};
