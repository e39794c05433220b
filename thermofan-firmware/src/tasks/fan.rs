//! Fan control task
//!
//! Owns the ramp controller. While idle it waits for a command; once
//! ramping it runs the ramp timer and races it against new commands, so
//! a deactivation takes effect before the next ramp tick.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use thermofan_core::config::ControlConfig;
use thermofan_core::fan::{FanRampController, RampConfig, RampStep};

use crate::board::Fan;
use crate::channels::{FAN_CMD, STATE};

/// Fan control task
#[embassy_executor::task]
pub async fn fan_task(pwm: Fan, config: &'static ControlConfig) {
    info!("Fan task started");

    let mut fan = FanRampController::new(pwm, RampConfig::from(config), &STATE);
    let ramp_interval = Duration::from_millis(config.ramp_interval_ms as u64);
    report_fault(&mut fan);

    loop {
        let command = FAN_CMD.wait().await;
        if !fan.apply(command, &STATE) {
            report_fault(&mut fan);
            continue;
        }

        info!("Fan ramp started");
        let mut ticker = Ticker::every(ramp_interval);

        while fan.is_ramping() {
            match select(ticker.next(), FAN_CMD.wait()).await {
                Either::First(()) => match fan.tick(&STATE) {
                    RampStep::Increased(duty) if fan.is_at_max() => {
                        info!("Fan at full duty ({}us)", duty)
                    }
                    RampStep::Increased(duty) => trace!("Fan duty {}us", duty),
                    RampStep::AtMax | RampStep::Idle => {}
                },
                Either::Second(command) => {
                    fan.apply(command, &STATE);
                }
            }
            report_fault(&mut fan);
        }

        info!("Fan stopped");
    }
}

fn report_fault(fan: &mut FanRampController<Fan>) {
    if let Some(e) = fan.take_fault() {
        warn!("Fan PWM write failed: {} ({} total)", e, fan.pwm_faults());
    }
}
