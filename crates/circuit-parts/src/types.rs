//! Component specification types
//!
//! Contains the category/interface enums and the per-category attribute
//! payloads that make up a catalog entry.

use serde::Serialize;

/// Behavioral category of a catalog component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Microcontroller,
    Sensor,
    Actuator,
    Passive,
    Communication,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Microcontroller => "microcontroller",
            Category::Sensor => "sensor",
            Category::Actuator => "actuator",
            Category::Passive => "passive",
            Category::Communication => "communication",
        }
    }
}

/// Electrical interface the component exposes to its driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    Analog,
    Digital,
    Pwm,
    Serial,
}

/// Microcontroller attributes
#[derive(Debug, Clone, Serialize)]
pub struct McuAttrs {
    /// ADC resolution [bits]
    pub adc_resolution: u32,
    /// Pins with hardware PWM, normalised names ("3", "A0", ...)
    pub pwm_pins: &'static [&'static str],
    /// Number of digital I/O pins
    pub digital_pins: u32,
    /// Number of analog input pins
    pub analog_pins: u32,
    /// Clock frequency [MHz]
    pub clock_mhz: u32,
}

/// Sensor attributes
#[derive(Debug, Clone, Serialize)]
pub struct SensorAttrs {
    /// Lower bound of the physical measurement range
    pub min: f64,
    /// Upper bound of the physical measurement range
    pub max: f64,
    /// Physical unit of a reading
    pub unit: &'static str,
    /// Sensor response time [ms]
    pub response_time_ms: u32,
    /// Reading a freshly started simulation begins with
    pub default_value: f64,
}

/// Actuator attributes
#[derive(Debug, Clone, Serialize)]
pub struct ActuatorAttrs {
    /// Whether the actuator accepts a duty-cycled drive signal
    pub pwm_capable: bool,
    /// Human readable output quantity (brightness, angle, ...)
    pub output: &'static str,
}

/// Passive component attributes
#[derive(Debug, Clone, Serialize)]
pub struct PassiveAttrs {
    /// Resistance [ohm]
    pub resistance: f64,
    /// Power rating [W]
    pub power_rating: f64,
}

/// Communication module attributes
#[derive(Debug, Clone, Serialize)]
pub struct CommAttrs {
    /// Supported baud rates, ascending; the first entry is the default
    pub baud_rates: &'static [u32],
    /// Protocol label reported while transmitting
    pub protocol: &'static str,
    /// Nominal radio range [m], 0 for wired modules
    pub range_m: f64,
}

/// Category-specific part of a [`ComponentSpec`].
///
/// The variant always agrees with [`ComponentSpec::category`]; the catalog is
/// written that way and `category()` is derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Attributes {
    Microcontroller(McuAttrs),
    Sensor(SensorAttrs),
    Actuator(ActuatorAttrs),
    Passive(PassiveAttrs),
    Communication(CommAttrs),
}

/// Electrical and behavioral profile of one catalog component type
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSpec {
    /// Catalog key
    pub type_name: &'static str,
    /// Display name
    pub display_name: &'static str,
    pub interface: InterfaceKind,
    /// Nominal supply voltage [V]
    pub voltage: f64,
    /// Rated current draw [mA]
    pub current_draw: f64,
    #[serde(flatten)]
    pub attrs: Attributes,
}

impl ComponentSpec {
    pub fn category(&self) -> Category {
        match self.attrs {
            Attributes::Microcontroller(_) => Category::Microcontroller,
            Attributes::Sensor(_) => Category::Sensor,
            Attributes::Actuator(_) => Category::Actuator,
            Attributes::Passive(_) => Category::Passive,
            Attributes::Communication(_) => Category::Communication,
        }
    }

    pub fn mcu(&self) -> Option<&McuAttrs> {
        match &self.attrs {
            Attributes::Microcontroller(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn sensor(&self) -> Option<&SensorAttrs> {
        match &self.attrs {
            Attributes::Sensor(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn passive(&self) -> Option<&PassiveAttrs> {
        match &self.attrs {
            Attributes::Passive(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn comm(&self) -> Option<&CommAttrs> {
        match &self.attrs {
            Attributes::Communication(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Maximum ADC code for a microcontroller, `2^bits - 1`
    pub fn max_adc(&self) -> Option<u32> {
        self.mcu().map(|attrs| (1u32 << attrs.adc_resolution) - 1)
    }

    /// True when `pin` names one of this microcontroller's PWM pins.
    pub fn is_pwm_pin(&self, pin: &str) -> bool {
        let Some(attrs) = self.mcu() else {
            return false;
        };
        let pin = normalize_pin(pin);
        attrs.pwm_pins.iter().any(|candidate| *candidate == pin)
    }
}

/// Reduce a pin reference to its catalog form.
///
/// `D3`, `d3`, `GPIO3`, `GP3` and `3` all become `3`; analog pins keep their
/// prefix in upper case (`a0` -> `A0`).
pub fn normalize_pin(pin: &str) -> String {
    let upper = pin.trim().to_ascii_uppercase();
    for prefix in ["GPIO", "GP", "D", ""] {
        if let Some(rest) = upper.strip_prefix(prefix) {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return strip_leading_zeros(rest);
            }
        }
    }
    upper
}

fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}
