//! Fan ramp controller
//!
//! Two states:
//!
//! - `Idle`: duty 0, ramp timer stopped
//! - `Ramping`: ramp timer running, duty increased by a fixed step on every
//!   tick until the ceiling, then held
//!
//! Activation only ramps up; deactivation is an instant cutoff, never a
//! ramp-down. Every duty change is written straight through to the PWM
//! output.
//!
//! # Usage
//!
//! ```ignore
//! let mut fan = FanRampController::new(pwm, RampConfig::default(), &state);
//! fan.activate(&state);
//!
//! // Every ramp interval while `fan.is_ramping()`:
//! fan.tick(&state);
//! ```

use super::FanCommand;
use crate::config::ControlConfig;
use crate::state::ControlState;
use crate::traits::{PwmError, PwmOutput};

/// Ramp timing and limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampConfig {
    /// Duty increment per tick (µs)
    pub step: u16,
    /// Duty ceiling (µs)
    pub max: u16,
    /// PWM period (µs)
    pub period_us: u16,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            step: 2,
            max: 256,
            period_us: 256,
        }
    }
}

impl From<&ControlConfig> for RampConfig {
    fn from(config: &ControlConfig) -> Self {
        Self {
            step: config.ramp_step,
            max: config.duty_max,
            period_us: config.pwm_period_us,
        }
    }
}

/// Ramp controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampState {
    /// Fan off, ramp timer stopped
    #[default]
    Idle,
    /// Ramp timer running
    Ramping,
}

/// Result of `activate()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activation {
    /// Transitioned Idle -> Ramping; the caller starts the ramp timer
    Started,
    /// Already ramping; nothing changed
    AlreadyRamping,
}

/// Result of `deactivate()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deactivation {
    /// Was ramping; duty forced to 0 and the ramp timer must stop
    Stopped,
    /// Already idle; duty rewritten as 0
    AlreadyIdle,
}

/// Result of one ramp tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampStep {
    /// Duty increased to the contained value
    Increased(u16),
    /// Duty already at the ceiling
    AtMax,
    /// Controller idle; tick ignored
    Idle,
}

/// Fan ramp controller
///
/// Owns the fan duty exclusively. The duty is 0 whenever the controller
/// is idle and never decreases while ramping.
pub struct FanRampController<P> {
    pwm: P,
    config: RampConfig,
    state: RampState,
    /// Current pulse width (µs)
    duty: u16,
    /// Last PWM write error, if any
    last_fault: Option<PwmError>,
    /// Number of failed PWM writes
    pwm_faults: u32,
}

impl<P: PwmOutput> FanRampController<P> {
    /// Create a new controller
    ///
    /// Programs the PWM period and starts with the fan off.
    pub fn new(pwm: P, config: RampConfig, shared: &ControlState) -> Self {
        let mut fan = Self {
            pwm,
            config,
            state: RampState::Idle,
            duty: 0,
            last_fault: None,
            pwm_faults: 0,
        };

        let result = fan.pwm.set_period_us(config.period_us);
        fan.record(result);
        fan.write_duty(shared);
        fan
    }

    /// Get the current state
    pub fn state(&self) -> RampState {
        self.state
    }

    /// Check if the ramp timer should be running
    pub fn is_ramping(&self) -> bool {
        self.state == RampState::Ramping
    }

    /// Current pulse width (µs)
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Check if the duty reached the ceiling
    pub fn is_at_max(&self) -> bool {
        self.duty >= self.config.max
    }

    /// Number of PWM writes that failed since boot
    pub fn pwm_faults(&self) -> u32 {
        self.pwm_faults
    }

    /// Take the most recent PWM error, if one occurred since the last call
    pub fn take_fault(&mut self) -> Option<PwmError> {
        self.last_fault.take()
    }

    /// Get access to the underlying PWM output
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Idle -> Ramping; no-op while ramping
    pub fn activate(&mut self, shared: &ControlState) -> Activation {
        match self.state {
            RampState::Ramping => Activation::AlreadyRamping,
            RampState::Idle => {
                self.state = RampState::Ramping;
                shared.publish_fan(self.duty, true);
                Activation::Started
            }
        }
    }

    /// Any state -> Idle, duty forced to 0 immediately
    pub fn deactivate(&mut self, shared: &ControlState) -> Deactivation {
        let was_ramping = self.is_ramping();
        self.state = RampState::Idle;
        self.duty = 0;
        self.write_duty(shared);

        if was_ramping {
            Deactivation::Stopped
        } else {
            Deactivation::AlreadyIdle
        }
    }

    /// Apply a monitor command
    ///
    /// Returns true if the ramp timer has to be (re)started.
    pub fn apply(&mut self, command: FanCommand, shared: &ControlState) -> bool {
        match command {
            FanCommand::Activate => self.activate(shared) == Activation::Started,
            FanCommand::Deactivate => {
                self.deactivate(shared);
                false
            }
        }
    }

    /// Advance the ramp by one step
    ///
    /// Call once per ramp interval. Ticks while idle are ignored and ticks
    /// at the ceiling leave the duty unchanged.
    pub fn tick(&mut self, shared: &ControlState) -> RampStep {
        if self.state != RampState::Ramping {
            return RampStep::Idle;
        }

        if self.duty >= self.config.max {
            return RampStep::AtMax;
        }

        self.duty = self
            .duty
            .saturating_add(self.config.step)
            .min(self.config.max);
        self.write_duty(shared);
        RampStep::Increased(self.duty)
    }

    /// Write the current duty to the PWM output and publish it
    fn write_duty(&mut self, shared: &ControlState) {
        let result = self.pwm.set_pulse_width_us(self.duty);
        self.record(result);
        shared.publish_fan(self.duty, self.is_ramping());
    }

    fn record(&mut self, result: Result<(), PwmError>) {
        if let Err(e) = result {
            self.last_fault = Some(e);
            self.pwm_faults = self.pwm_faults.saturating_add(1);
        }
    }
}
