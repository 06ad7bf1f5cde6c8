//! Vibration motor haptic driver
//!
//! Drives a motor (or buzzer standing in for one) on a single GPIO.
//! Playback blocks; the longest pattern is three long pulses, well
//! under the human cadence of incoming signals.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use pitchlink_core::engine::PulsePattern;
use pitchlink_core::traits::HapticDriver;

/// Pulse player over one output pin
pub struct PulseMotor<PIN, DLY> {
    pin: PIN,
    delay: DLY,
}

impl<PIN, DLY> PulseMotor<PIN, DLY>
where
    PIN: OutputPin,
    DLY: DelayNs,
{
    /// Wrap a motor pin; the pin is driven low immediately
    pub fn new(mut pin: PIN, delay: DLY) -> Self {
        let _ = pin.set_low();
        Self { pin, delay }
    }
}

impl<PIN, DLY> HapticDriver for PulseMotor<PIN, DLY>
where
    PIN: OutputPin,
    DLY: DelayNs,
{
    fn play(&mut self, pattern: PulsePattern) {
        // haptics are best effort; a broken pin must not take the
        // receive cycle down with it
        for i in 0..pattern.count {
            let _ = self.pin.set_high();
            self.delay.delay_ms(u32::from(pattern.on_ms));
            let _ = self.pin.set_low();
            if i + 1 < pattern.count {
                self.delay.delay_ms(u32::from(pattern.off_ms));
            }
        }
    }
}
