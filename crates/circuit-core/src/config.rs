use serde::Deserialize;

/// Tunables for the behavioral model.
///
/// The defaults reproduce the reference thresholds; callers normally only
/// override `seed`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base seed for per-simulation noise generators
    pub seed: u64,
    /// Half-width of the multiplicative sensor noise band (0.05 = ±5%)
    pub noise_fraction: f64,
    /// PWM carrier frequency [Hz]
    pub pwm_frequency_hz: f64,
    /// Duty cycle assigned to PWM-driven actuators [%]
    pub default_duty_cycle: f64,
    /// Step size used when the caller does not pass one [ms]
    pub default_step_ms: u64,
    /// Whole-circuit ceiling before `ExcessivePowerDraw` fires [mA]
    pub excessive_power_ma: f64,
    /// Multiple of a microcontroller's rating that flags brownout risk
    pub brownout_factor: f64,
    /// Allowed source/sink voltage difference [V]
    pub voltage_tolerance: f64,
    /// Consumption above which a power recommendation is emitted [mA]
    pub power_optimization_threshold_ma: f64,
    /// Share of the draw quoted as achievable savings
    pub estimated_savings_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_c1c0,
            noise_fraction: 0.05,
            pwm_frequency_hz: 490.0,
            default_duty_cycle: 50.0,
            default_step_ms: 100,
            excessive_power_ma: 1000.0,
            brownout_factor: 2.0,
            voltage_tolerance: 0.5,
            power_optimization_threshold_ma: 300.0,
            estimated_savings_fraction: 0.3,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
