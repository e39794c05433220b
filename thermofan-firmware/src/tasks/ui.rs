//! User interface task
//!
//! The unbounded main loop: poll the touch panel, sample the sensor, and
//! redraw the status screen. Yields after every pass so the fan and
//! monitor tasks keep running.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Instant;

use thermofan_core::input::{ThresholdEditor, TouchOutcome};
use thermofan_core::sensor::SampleStatus;
use thermofan_core::ui::StatusPresenter;

use crate::board::{Display, Sensor, Touch};
use crate::channels::STATE;

/// Everything the UI loop owns
pub struct UiContext {
    pub touch: Touch,
    pub sensor: Sensor,
    pub display: Display,
    pub editor: ThresholdEditor,
    pub presenter: StatusPresenter,
}

/// Driver fault counters seen on the previous pass
#[derive(Default)]
struct FaultCounts {
    adc: u32,
    i2c: u32,
    off_screen: u32,
}

/// User interface task
#[embassy_executor::task]
pub async fn ui_task(mut ui: UiContext) {
    info!("UI task started");

    let mut last_status = SampleStatus::InRange;
    let mut faults = FaultCounts::default();

    loop {
        let now_ms = Instant::now().as_millis();

        match ui.editor.poll(&mut ui.touch, &STATE, now_ms) {
            TouchOutcome::Increased(limit) => info!("Threshold raised to {}C", limit),
            TouchOutcome::Decreased(limit) => info!("Threshold lowered to {}C", limit),
            TouchOutcome::Ignored => debug!("Touch outside both zones"),
            TouchOutcome::Debounced | TouchOutcome::NoTouch => {}
        }

        let reading = ui.sensor.read(&STATE);
        if reading.status != last_status {
            match reading.status {
                SampleStatus::OutOfRange => warn!("Sensor sample out of range: {}C", reading.celsius),
                SampleStatus::InRange => info!("Sensor sample back in range"),
            }
            last_status = reading.status;
        }

        report_faults(&ui, &mut faults);

        if let Err(e) = ui.presenter.render(&mut ui.display, &STATE, now_ms) {
            warn!("Render failed: {}", e);
        }

        yield_now().await;
    }
}

fn report_faults(ui: &UiContext, seen: &mut FaultCounts) {
    let adc = ui.sensor.input().errors();
    if adc != seen.adc {
        warn!("ADC read failed, repeating last sample ({} total)", adc);
        seen.adc = adc;
    }

    let i2c = ui.touch.errors();
    if i2c != seen.i2c {
        warn!("Touch controller read failed ({} total)", i2c);
        seen.i2c = i2c;
    }

    let off_screen = ui.touch.off_screen();
    if off_screen != seen.off_screen {
        warn!("Touch reported outside the screen ({} total)", off_screen);
        seen.off_screen = off_screen;
    }
}
