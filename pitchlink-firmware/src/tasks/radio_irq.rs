//! DIO1 edge watcher
//!
//! The only job of this task is to raise the receive flag. Frame
//! read-out and re-arm are blocking SPI work and belong in the service
//! cycle, not here.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::RX_FLAG;

/// Raise the receive flag on each DIO1 rising edge
#[embassy_executor::task]
pub async fn radio_irq_task(mut dio1: Input<'static>) {
    info!("DIO1 watcher started");

    loop {
        dio1.wait_for_rising_edge().await;
        RX_FLAG.raise();
    }
}
