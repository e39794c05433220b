//! Cross-task control state
//!
//! The fan task, the monitor task, and the UI loop run concurrently and
//! share a handful of scalars. Each scalar is its own atomic cell with a
//! single writer:
//!
//! | Cell              | Writer              | Readers               |
//! |-------------------|---------------------|-----------------------|
//! | `temperature`     | Sensor Reader       | Monitor, Presenter    |
//! | `threshold`       | Threshold Editor    | Monitor, Presenter    |
//! | `fan_duty/active` | Fan Ramp Controller | Presenter             |
//! | feedback requests | Threshold Editor    | Presenter (consumes)  |

use portable_atomic::{AtomicBool, AtomicF32, AtomicU16, Ordering};

/// Point-in-time copy of the shared state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSnapshot {
    /// Latest temperature (°C)
    pub temperature: f32,
    /// Current threshold (°C)
    pub threshold: f32,
    /// Fan pulse width (µs)
    pub fan_duty: u16,
    /// Fan ramp active
    pub fan_active: bool,
}

/// Shared control state
///
/// `const` constructible so the firmware can keep it in a `static`.
pub struct ControlState {
    temperature: AtomicF32,
    threshold: AtomicF32,
    fan_duty: AtomicU16,
    fan_active: AtomicBool,
    plus_requested: AtomicBool,
    minus_requested: AtomicBool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlState {
    /// Create a zeroed state (fan idle)
    pub const fn new() -> Self {
        Self {
            temperature: AtomicF32::new(0.0),
            threshold: AtomicF32::new(0.0),
            fan_duty: AtomicU16::new(0),
            fan_active: AtomicBool::new(false),
            plus_requested: AtomicBool::new(false),
            minus_requested: AtomicBool::new(false),
        }
    }

    /// Latest temperature (°C)
    pub fn temperature(&self) -> f32 {
        self.temperature.load(Ordering::Acquire)
    }

    /// Store a new temperature reading
    pub fn set_temperature(&self, celsius: f32) {
        self.temperature.store(celsius, Ordering::Release);
    }

    /// Current threshold (°C)
    pub fn threshold(&self) -> f32 {
        self.threshold.load(Ordering::Acquire)
    }

    /// Replace the threshold
    pub fn set_threshold(&self, celsius: f32) {
        self.threshold.store(celsius, Ordering::Release);
    }

    /// Fan pulse width (µs)
    pub fn fan_duty(&self) -> u16 {
        self.fan_duty.load(Ordering::Acquire)
    }

    /// Whether the fan ramp is active
    pub fn fan_active(&self) -> bool {
        self.fan_active.load(Ordering::Acquire)
    }

    /// Publish the fan state (called by the ramp controller only)
    pub fn publish_fan(&self, duty: u16, active: bool) {
        self.fan_duty.store(duty, Ordering::Release);
        self.fan_active.store(active, Ordering::Release);
    }

    /// Raise the one-shot "+" feedback request
    pub fn request_plus_feedback(&self) {
        self.plus_requested.store(true, Ordering::Release);
    }

    /// Raise the one-shot "-" feedback request
    pub fn request_minus_feedback(&self) {
        self.minus_requested.store(true, Ordering::Release);
    }

    /// Consume the "+" feedback request, returning whether it was raised
    pub fn take_plus_feedback(&self) -> bool {
        self.plus_requested.swap(false, Ordering::AcqRel)
    }

    /// Consume the "-" feedback request, returning whether it was raised
    pub fn take_minus_feedback(&self) -> bool {
        self.minus_requested.swap(false, Ordering::AcqRel)
    }

    /// Copy all scalar cells
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            temperature: self.temperature(),
            threshold: self.threshold(),
            fan_duty: self.fan_duty(),
            fan_active: self.fan_active(),
        }
    }
}
