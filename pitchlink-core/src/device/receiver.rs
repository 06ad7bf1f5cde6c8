//! Receiver processing cycle
//!
//! Startup configures the link and arms reception once; the service
//! cycle consumes the receive flag, drains and classifies the frame,
//! drives the collaborators and re-arms. Re-arming happens in the
//! success and the error path both; skipping it anywhere would silently
//! stop reception for the rest of the session.

use pitchlink_protocol::LinkParams;

use crate::engine::{classify, pattern_for, PresenceTimer, RenderIntent};
use crate::link::{LinkError, RadioLink, RxFlag};
use crate::traits::{HapticDriver, RadioDriver, RenderSink};

/// One receiving device: link, engine state and collaborators
pub struct ReceiverDevice<'a, R, D, H> {
    link: RadioLink<R>,
    display: D,
    haptic: H,
    presence: PresenceTimer,
    rx_flag: &'a RxFlag,
    link_up: bool,
    current: Option<RenderIntent>,
}

impl<'a, R, D, H> ReceiverDevice<'a, R, D, H>
where
    R: RadioDriver,
    D: RenderSink,
    H: HapticDriver,
{
    /// Assemble a device around its collaborators
    ///
    /// `rx_flag` is the flag the board's interrupt handler raises on a
    /// receive completion.
    pub fn new(radio: R, display: D, haptic: H, rx_flag: &'a RxFlag) -> Self {
        Self {
            link: RadioLink::new(radio),
            display,
            haptic,
            presence: PresenceTimer::new(),
            rx_flag,
            link_up: false,
            current: None,
        }
    }

    fn show(&mut self, intent: RenderIntent) {
        self.display.render(&intent);
        self.current = Some(intent);
    }

    /// Configure the link and arm first reception
    ///
    /// On failure the device stays up in a degraded state: the startup
    /// screen shows the failure and [`Self::service`] becomes inert.
    /// The error is returned for logging only.
    pub fn start(&mut self, params: &LinkParams) -> Result<(), LinkError> {
        let outcome = self
            .link
            .configure(params)
            .and_then(|()| self.link.begin_receive());

        self.link_up = outcome.is_ok();
        self.show(RenderIntent::Startup {
            radio_ok: self.link_up,
        });
        outcome
    }

    /// Run one processing cycle
    ///
    /// Call at a steady cadence from the board main loop. Returns the
    /// first link error of the cycle for logging; the frame in question
    /// is already dropped and reception already re-armed by the time it
    /// is returned.
    pub fn service(&mut self, now_ms: u64) -> Result<(), LinkError> {
        if !self.link_up {
            return Ok(());
        }

        let mut outcome = Ok(());

        if self.rx_flag.take() {
            match self.link.read_received() {
                Ok(record) => {
                    let intent = classify(&record);
                    self.show(intent);
                    if let Some(pattern) = pattern_for(&intent) {
                        self.haptic.play(pattern);
                    }
                    self.presence.mark(now_ms);
                }
                // dropped frame, no corrective action
                Err(err) => outcome = Err(err),
            }

            // Re-arm unconditionally, also after errors.
            if let Err(err) = self.link.begin_receive() {
                outcome = outcome.and(Err(err));
            }
        }

        if self.presence.poll(now_ms) {
            self.show(RenderIntent::Waiting);
        }

        outcome
    }

    /// Whether the link came up at startup
    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    /// The most recently presented intent
    pub fn current_intent(&self) -> Option<&RenderIntent> {
        self.current.as_ref()
    }

    /// The link adapter, for armed-state assertions in tests
    pub fn link(&self) -> &RadioLink<R> {
        &self.link
    }

    /// The display collaborator
    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PulsePattern, QUIET_TIMEOUT_MS};
    use crate::traits::{DisplayClass, RadioError};
    use pitchlink_protocol::{Pitch, RECORD_SIZE};

    struct FakeRadio {
        alive: bool,
        frame: Option<heapless::Vec<u8, 16>>,
        armed: bool,
        unarmed_reads: u32,
    }

    impl FakeRadio {
        fn new() -> Self {
            Self {
                alive: true,
                frame: None,
                armed: false,
                unarmed_reads: 0,
            }
        }

        fn dead() -> Self {
            Self {
                alive: false,
                ..Self::new()
            }
        }
    }

    impl RadioDriver for FakeRadio {
        fn configure(&mut self, _params: &LinkParams) -> Result<(), RadioError> {
            if self.alive {
                Ok(())
            } else {
                Err(RadioError::NotPresent)
            }
        }

        fn transmit(&mut self, _frame: &[u8]) -> Result<(), RadioError> {
            Ok(())
        }

        fn start_receive(&mut self) -> Result<(), RadioError> {
            self.armed = true;
            Ok(())
        }

        fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize, RadioError> {
            if !self.armed {
                self.unarmed_reads += 1;
            }
            self.armed = false;
            let frame = self.frame.take().ok_or(RadioError::Receive)?;
            let n = frame.len().min(buf.len());
            buf[..n].copy_from_slice(&frame[..n]);
            Ok(frame.len())
        }
    }

    #[derive(Default)]
    struct CaptureSink {
        rendered: heapless::Vec<RenderIntent, 16>,
    }

    impl RenderSink for CaptureSink {
        fn class(&self) -> DisplayClass {
            DisplayClass::MonoTile
        }

        fn render(&mut self, intent: &RenderIntent) {
            self.rendered.push(*intent).unwrap();
        }
    }

    #[derive(Default)]
    struct CaptureHaptic {
        played: heapless::Vec<PulsePattern, 16>,
    }

    impl HapticDriver for CaptureHaptic {
        fn play(&mut self, pattern: PulsePattern) {
            self.played.push(pattern).unwrap();
        }
    }

    fn leaked_flag() -> &'static RxFlag {
        Box::leak(Box::new(RxFlag::new()))
    }

    fn started_device() -> ReceiverDevice<'static, FakeRadio, CaptureSink, CaptureHaptic> {
        let mut device = ReceiverDevice::new(
            FakeRadio::new(),
            CaptureSink::default(),
            CaptureHaptic::default(),
            leaked_flag(),
        );
        device.start(&LinkParams::DEFAULT).unwrap();
        device
    }

    #[test]
    fn test_start_renders_ready() {
        let device = started_device();

        assert!(device.is_link_up());
        assert_eq!(
            device.display().rendered[0],
            RenderIntent::Startup { radio_ok: true }
        );
        assert!(device.link().is_armed());
    }

    #[test]
    fn test_dead_radio_degrades_not_panics() {
        let flag = leaked_flag();
        let mut device = ReceiverDevice::new(
            FakeRadio::dead(),
            CaptureSink::default(),
            CaptureHaptic::default(),
            flag,
        );

        let err = device.start(&LinkParams::DEFAULT).unwrap_err();
        assert_eq!(err, LinkError::Init(RadioError::NotPresent));
        assert!(!device.is_link_up());
        assert_eq!(
            device.display().rendered[0],
            RenderIntent::Startup { radio_ok: false }
        );

        // degraded service is inert, the flag is not even consumed
        flag.raise();
        assert_eq!(device.service(0), Ok(()));
        assert_eq!(device.display().rendered.len(), 1);
        assert!(flag.take());
    }

    #[test]
    fn test_frame_renders_and_pulses() {
        let mut device = started_device();
        device.link.radio_mut().frame =
            Some(heapless::Vec::from_slice(&[0, 0, 5, 0, 0, 1, 0]).unwrap());

        device.rx_flag.raise();
        device.service(100).unwrap();

        assert_eq!(
            device.display().rendered[1],
            RenderIntent::Call {
                pitch: Some(Pitch::Fastball),
                zone: 5,
                pickoff: 0,
                third_sign: 0,
                sequence: 1,
            }
        );
        assert_eq!(device.haptic.played.len(), 1);
        // re-armed for the next frame
        assert!(device.link().is_armed());
    }

    #[test]
    fn test_error_path_still_rearms() {
        let mut device = started_device();
        // flag raised but no frame behind it: reception error

        device.rx_flag.raise();
        let err = device.service(100).unwrap_err();

        assert_eq!(err, LinkError::Receive(RadioError::Receive));
        assert!(device.link().is_armed());
        // nothing rendered beyond startup, no pulse
        assert_eq!(device.display().rendered.len(), 1);
        assert!(device.haptic.played.is_empty());
    }

    #[test]
    fn test_no_unarmed_reads_across_cycles() {
        let mut device = started_device();

        for i in 0..5u64 {
            device.link.radio_mut().frame =
                Some(heapless::Vec::from_slice(&[0; RECORD_SIZE]).unwrap());
            device.rx_flag.raise();
            device.service(i * 50).unwrap();
        }

        assert_eq!(device.link().radio().unarmed_reads, 0);
    }

    #[test]
    fn test_waiting_fires_once() {
        let mut device = started_device();
        device.link.radio_mut().frame =
            Some(heapless::Vec::from_slice(&[0; RECORD_SIZE]).unwrap());
        device.rx_flag.raise();
        device.service(1_000).unwrap();

        device.service(1_000 + QUIET_TIMEOUT_MS).unwrap();
        device.service(1_001 + QUIET_TIMEOUT_MS).unwrap();
        device.service(2_000 + QUIET_TIMEOUT_MS).unwrap();

        let waits = device
            .display()
            .rendered
            .iter()
            .filter(|i| **i == RenderIntent::Waiting)
            .count();
        assert_eq!(waits, 1);
        assert_eq!(device.current_intent(), Some(&RenderIntent::Waiting));
    }
}
