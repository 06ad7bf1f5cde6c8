//! RGB link status indicator
//!
//! The smallest receivers have no panel worth a startup screen; a
//! tri-color LED carries the link state instead. Green ready, blue
//! while a frame is being drained, red for a dead radio.

use embedded_hal::digital::OutputPin;

/// Link states the LED distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Booting, not configured yet
    Startup,
    /// Armed and listening
    Ready,
    /// Draining a received frame
    Receiving,
    /// Radio failed at startup; permanent for the session
    Failed,
}

/// Tri-color LED over three output pins
pub struct StatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    active_low: bool,
}

impl<R, G, B> StatusLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// LED wired active-high
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            active_low: false,
        };
        led.set(LinkStatus::Startup);
        led
    }

    /// LED wired active-low (common-anode packages)
    pub fn new_active_low(red: R, green: G, blue: B) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            active_low: true,
        };
        led.set(LinkStatus::Startup);
        led
    }

    /// Show a link state
    pub fn set(&mut self, status: LinkStatus) {
        let (r, g, b) = match status {
            LinkStatus::Startup => (false, false, false),
            LinkStatus::Ready => (false, true, false),
            LinkStatus::Receiving => (false, false, true),
            LinkStatus::Failed => (true, false, false),
        };
        self.drive(r, g, b);
    }

    fn drive(&mut self, r: bool, g: bool, b: bool) {
        let level = |on: bool| on != self.active_low;
        let _ = set_to(&mut self.red, level(r));
        let _ = set_to(&mut self.green, level(g));
        let _ = set_to(&mut self.blue, level(b));
    }
}

fn set_to<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct LevelPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl OutputPin for LevelPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_ready_is_green() {
        let mut led = StatusLed::new(LevelPin::default(), LevelPin::default(), LevelPin::default());
        led.set(LinkStatus::Ready);

        assert!(!led.red.high);
        assert!(led.green.high);
        assert!(!led.blue.high);
    }

    #[test]
    fn test_active_low_inverts() {
        let mut led = StatusLed::new_active_low(
            LevelPin::default(),
            LevelPin::default(),
            LevelPin::default(),
        );
        led.set(LinkStatus::Failed);

        assert!(!led.red.high);
        assert!(led.green.high);
        assert!(led.blue.high);
    }
}
