//! Threshold monitor task
//!
//! Compares temperature and threshold once per monitor interval and
//! forwards the resulting command to the fan task.

use defmt::*;
use embassy_time::{Duration, Ticker};

use thermofan_core::config::ControlConfig;
use thermofan_core::monitor::ThresholdMonitor;

use crate::channels::{FAN_CMD, STATE};

/// Threshold monitor task
#[embassy_executor::task]
pub async fn monitor_task(config: &'static ControlConfig) {
    info!("Monitor task started");

    let mut monitor = ThresholdMonitor::new();
    let mut ticker = Ticker::every(Duration::from_millis(config.monitor_interval_ms as u64));

    loop {
        ticker.next().await;

        let previous = monitor.last();
        let command = monitor.check(&STATE);
        if previous != Some(command) {
            debug!(
                "Fan command {} (temp {}C, limit {}C, {} changes)",
                command,
                STATE.temperature(),
                STATE.threshold(),
                monitor.toggles()
            );
        }

        FAN_CMD.signal(command);
    }
}
