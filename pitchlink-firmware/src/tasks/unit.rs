//! Receiver service cycle
//!
//! Runs the shared device cycle at a steady cadence. A dead radio does
//! not stop the task; the device is already showing its failed startup
//! screen and the cycle is inert.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Duration, Instant, Ticker};
use embedded_hal_bus::spi::ExclusiveDevice;

use pitchlink_core::device::ReceiverDevice;
use pitchlink_drivers::{LinkStatus, PulseMotor, StatusLed, Sx1262};
use pitchlink_protocol::LinkParams;

use crate::boards::SERVICE_INTERVAL_MS;
use crate::panel::DefmtPanel;

type RadioSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>;
type Radio = Sx1262<RadioSpi, Output<'static>, Input<'static>, Delay>;
type Motor = PulseMotor<Output<'static>, Delay>;
type Led = StatusLed<Output<'static>, Output<'static>, Output<'static>>;

/// The fully-wired receiver unit
pub type Unit = ReceiverDevice<'static, Radio, DefmtPanel, Motor>;

/// Bring the link up, then run the service cycle forever
#[embassy_executor::task]
pub async fn unit_task(mut device: Unit, mut led: Led) {
    match device.start(&LinkParams::DEFAULT) {
        Ok(()) => info!("link up"),
        Err(err) => warn!("radio init failed, running degraded: {}", err),
    }
    led.set(if device.is_link_up() {
        LinkStatus::Ready
    } else {
        LinkStatus::Failed
    });

    let mut ticker = Ticker::every(Duration::from_millis(SERVICE_INTERVAL_MS));
    let started = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = started.elapsed().as_millis();
        if let Err(err) = device.service(now_ms) {
            // frame already dropped and reception re-armed
            warn!("rx error: {}", err);
        }
    }
}
