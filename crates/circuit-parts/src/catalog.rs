//! Curated component catalog
//!
//! The table is compiled in and never mutated. Voltages are nominal supply
//! voltages [V], currents are typical draws [mA].

use thiserror::Error;

use crate::types::*;

/// Lookup miss on the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component type: {0}")]
pub struct UnknownComponentType(pub String);

const UNO_PWM: &[&str] = &["3", "5", "6", "9", "10", "11"];
const ESP32_PWM: &[&str] = &[
    "2", "4", "5", "12", "13", "14", "15", "16", "17", "18", "19", "21", "22", "23", "25", "26",
    "27", "32", "33",
];
const PICO_PWM: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
    "17", "18", "19", "20", "21", "22", "26", "27", "28",
];

const UART_BAUDS: &[u32] = &[9600, 19200, 38400, 57600, 115200];
const WIFI_BAUDS: &[u32] = &[115200, 230400, 460800];
const SPI_BAUDS: &[u32] = &[250_000, 1_000_000, 2_000_000];

static CATALOG: &[ComponentSpec] = &[
    // ============ Microcontrollers ============
    ComponentSpec {
        type_name: "arduino_uno",
        display_name: "Arduino Uno R3",
        interface: InterfaceKind::Digital,
        voltage: 5.0,
        current_draw: 50.0,
        attrs: Attributes::Microcontroller(McuAttrs {
            adc_resolution: 10,
            pwm_pins: UNO_PWM,
            digital_pins: 14,
            analog_pins: 6,
            clock_mhz: 16,
        }),
    },
    ComponentSpec {
        type_name: "arduino_nano",
        display_name: "Arduino Nano",
        interface: InterfaceKind::Digital,
        voltage: 5.0,
        current_draw: 19.0,
        attrs: Attributes::Microcontroller(McuAttrs {
            adc_resolution: 10,
            pwm_pins: UNO_PWM,
            digital_pins: 14,
            analog_pins: 8,
            clock_mhz: 16,
        }),
    },
    ComponentSpec {
        type_name: "esp32",
        display_name: "ESP32 DevKit",
        interface: InterfaceKind::Digital,
        voltage: 3.3,
        current_draw: 240.0,
        attrs: Attributes::Microcontroller(McuAttrs {
            adc_resolution: 12,
            pwm_pins: ESP32_PWM,
            digital_pins: 34,
            analog_pins: 18,
            clock_mhz: 240,
        }),
    },
    ComponentSpec {
        type_name: "raspberry_pi_pico",
        display_name: "Raspberry Pi Pico",
        interface: InterfaceKind::Digital,
        voltage: 3.3,
        current_draw: 25.0,
        attrs: Attributes::Microcontroller(McuAttrs {
            adc_resolution: 12,
            pwm_pins: PICO_PWM,
            digital_pins: 26,
            analog_pins: 3,
            clock_mhz: 133,
        }),
    },
    // ============ Sensors ============
    ComponentSpec {
        type_name: "dht22",
        display_name: "DHT22 Temperature/Humidity",
        interface: InterfaceKind::Digital,
        voltage: 5.0,
        current_draw: 1.5,
        attrs: Attributes::Sensor(SensorAttrs {
            min: -40.0,
            max: 80.0,
            unit: "°C",
            response_time_ms: 2000,
            default_value: 22.0,
        }),
    },
    ComponentSpec {
        type_name: "hc_sr04",
        display_name: "HC-SR04 Ultrasonic Distance",
        interface: InterfaceKind::Digital,
        voltage: 5.0,
        current_draw: 15.0,
        attrs: Attributes::Sensor(SensorAttrs {
            min: 2.0,
            max: 400.0,
            unit: "cm",
            response_time_ms: 60,
            default_value: 100.0,
        }),
    },
    ComponentSpec {
        type_name: "photoresistor",
        display_name: "LDR Photoresistor",
        interface: InterfaceKind::Analog,
        voltage: 5.0,
        current_draw: 0.5,
        attrs: Attributes::Sensor(SensorAttrs {
            min: 0.0,
            max: 1000.0,
            unit: "lux",
            response_time_ms: 30,
            default_value: 500.0,
        }),
    },
    ComponentSpec {
        type_name: "soil_moisture",
        display_name: "Capacitive Soil Moisture",
        interface: InterfaceKind::Analog,
        voltage: 5.0,
        current_draw: 5.0,
        attrs: Attributes::Sensor(SensorAttrs {
            min: 0.0,
            max: 100.0,
            unit: "%",
            response_time_ms: 500,
            default_value: 50.0,
        }),
    },
    // Idle at 0.0. Noise is multiplicative, so only an override raises it.
    ComponentSpec {
        type_name: "pir_motion",
        display_name: "HC-SR501 PIR Motion",
        interface: InterfaceKind::Digital,
        voltage: 5.0,
        current_draw: 0.065,
        attrs: Attributes::Sensor(SensorAttrs {
            min: 0.0,
            max: 1.0,
            unit: "motion",
            response_time_ms: 2500,
            default_value: 0.0,
        }),
    },
    ComponentSpec {
        type_name: "bmp280",
        display_name: "BMP280 Barometric Pressure",
        interface: InterfaceKind::Serial,
        voltage: 3.3,
        current_draw: 0.0027,
        attrs: Attributes::Sensor(SensorAttrs {
            min: 300.0,
            max: 1100.0,
            unit: "hPa",
            response_time_ms: 40,
            default_value: 1013.25,
        }),
    },
    // ============ Actuators ============
    ComponentSpec {
        type_name: "led",
        display_name: "5mm LED",
        interface: InterfaceKind::Pwm,
        voltage: 5.0,
        current_draw: 20.0,
        attrs: Attributes::Actuator(ActuatorAttrs {
            pwm_capable: true,
            output: "brightness",
        }),
    },
    ComponentSpec {
        type_name: "servo_sg90",
        display_name: "SG90 Micro Servo",
        interface: InterfaceKind::Pwm,
        voltage: 5.0,
        current_draw: 100.0,
        attrs: Attributes::Actuator(ActuatorAttrs {
            pwm_capable: true,
            output: "angle",
        }),
    },
    ComponentSpec {
        type_name: "buzzer",
        display_name: "Piezo Buzzer",
        interface: InterfaceKind::Pwm,
        voltage: 5.0,
        current_draw: 30.0,
        attrs: Attributes::Actuator(ActuatorAttrs {
            pwm_capable: true,
            output: "tone",
        }),
    },
    ComponentSpec {
        type_name: "dc_motor",
        display_name: "DC Hobby Motor",
        interface: InterfaceKind::Pwm,
        voltage: 6.0,
        current_draw: 250.0,
        attrs: Attributes::Actuator(ActuatorAttrs {
            pwm_capable: true,
            output: "speed",
        }),
    },
    ComponentSpec {
        type_name: "relay_module",
        display_name: "5V Relay Module",
        interface: InterfaceKind::Digital,
        voltage: 5.0,
        current_draw: 70.0,
        attrs: Attributes::Actuator(ActuatorAttrs {
            pwm_capable: false,
            output: "contact",
        }),
    },
    // ============ Passives ============
    ComponentSpec {
        type_name: "resistor_220",
        display_name: "220Ω Resistor",
        interface: InterfaceKind::Analog,
        voltage: 0.0,
        current_draw: 0.0,
        attrs: Attributes::Passive(PassiveAttrs {
            resistance: 220.0,
            power_rating: 0.25,
        }),
    },
    ComponentSpec {
        type_name: "resistor_1k",
        display_name: "1kΩ Resistor",
        interface: InterfaceKind::Analog,
        voltage: 0.0,
        current_draw: 0.0,
        attrs: Attributes::Passive(PassiveAttrs {
            resistance: 1_000.0,
            power_rating: 0.25,
        }),
    },
    ComponentSpec {
        type_name: "resistor_10k",
        display_name: "10kΩ Resistor",
        interface: InterfaceKind::Analog,
        voltage: 0.0,
        current_draw: 0.0,
        attrs: Attributes::Passive(PassiveAttrs {
            resistance: 10_000.0,
            power_rating: 0.25,
        }),
    },
    // ============ Communication ============
    ComponentSpec {
        type_name: "hc05_bluetooth",
        display_name: "HC-05 Bluetooth",
        interface: InterfaceKind::Serial,
        voltage: 5.0,
        current_draw: 40.0,
        attrs: Attributes::Communication(CommAttrs {
            baud_rates: UART_BAUDS,
            protocol: "Bluetooth SPP",
            range_m: 10.0,
        }),
    },
    ComponentSpec {
        type_name: "esp01_wifi",
        display_name: "ESP-01 WiFi",
        interface: InterfaceKind::Serial,
        voltage: 3.3,
        current_draw: 80.0,
        attrs: Attributes::Communication(CommAttrs {
            baud_rates: WIFI_BAUDS,
            protocol: "WiFi 802.11 b/g/n",
            range_m: 50.0,
        }),
    },
    ComponentSpec {
        type_name: "nrf24l01",
        display_name: "nRF24L01 Radio",
        interface: InterfaceKind::Serial,
        voltage: 3.3,
        current_draw: 12.0,
        attrs: Attributes::Communication(CommAttrs {
            baud_rates: SPI_BAUDS,
            protocol: "SPI/2.4GHz",
            range_m: 100.0,
        }),
    },
];

/// Every catalog entry, in table order.
pub fn catalog() -> &'static [ComponentSpec] {
    CATALOG
}

/// Resolve a component type name to its specification.
pub fn lookup(type_name: &str) -> Result<&'static ComponentSpec, UnknownComponentType> {
    CATALOG
        .iter()
        .find(|spec| spec.type_name == type_name)
        .ok_or_else(|| UnknownComponentType(type_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_resolves_known_type() {
        let spec = lookup("arduino_uno").unwrap();
        assert_eq!(spec.category(), Category::Microcontroller);
        assert_eq!(spec.max_adc(), Some(1023));
        assert!(spec.is_pwm_pin("D9"));
        assert!(!spec.is_pwm_pin("D2"));
    }

    #[test]
    fn lookup_rejects_unknown_type() {
        let err = lookup("flux_capacitor").unwrap_err();
        assert_eq!(err, UnknownComponentType("flux_capacitor".to_string()));
    }

    #[test]
    fn catalog_type_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in catalog() {
            assert!(seen.insert(spec.type_name), "duplicate {}", spec.type_name);
        }
    }

    #[test]
    fn sensor_defaults_sit_inside_range() {
        for spec in catalog() {
            if let Some(sensor) = spec.sensor() {
                assert!(sensor.min < sensor.max, "{}", spec.type_name);
                assert!(
                    (sensor.min..=sensor.max).contains(&sensor.default_value),
                    "{}",
                    spec.type_name
                );
            }
        }
    }

    #[test]
    fn comm_modules_list_baud_rates() {
        for spec in catalog() {
            if let Some(comm) = spec.comm() {
                assert!(!comm.baud_rates.is_empty());
                assert!(comm.baud_rates.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
