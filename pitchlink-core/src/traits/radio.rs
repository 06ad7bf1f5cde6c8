//! Radio transceiver collaborator trait

use pitchlink_protocol::LinkParams;

/// Errors reported by a transceiver driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Transceiver absent or unresponsive on its control bus
    NotPresent,
    /// Transceiver rejected the requested operating parameters
    Rejected,
    /// Transmission did not complete
    Transmit,
    /// Reception completed with a hardware-reported error
    Receive,
}

/// Trait for the physical (or simulated) transceiver
///
/// The link adapter owns a `RadioDriver` and layers the record codec and
/// the arm/re-arm discipline on top of it. Implementations stay dumb:
/// no retries, no queuing, no decoding.
pub trait RadioDriver {
    /// Apply channel configuration
    ///
    /// Must be called once before any transmit or receive. A failure here
    /// means the link cannot operate on this device at all.
    fn configure(&mut self, params: &LinkParams) -> Result<(), RadioError>;

    /// Transmit one frame, blocking for the duration of on-air time
    fn transmit(&mut self, frame: &[u8]) -> Result<(), RadioError>;

    /// Arm single-shot reception
    ///
    /// The completion notification is edge-triggered: one notification
    /// corresponds to exactly one received frame or one reception error,
    /// after which the hardware returns to idle. The caller must re-arm
    /// explicitly after every notification.
    fn start_receive(&mut self) -> Result<(), RadioError>;

    /// Drain the frame behind the most recent completion notification
    ///
    /// Copies up to `buf.len()` bytes and returns the full frame length,
    /// which may exceed what was copied. Returns `RadioError::Receive`
    /// when the notification reported a reception error instead of a
    /// frame.
    fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize, RadioError>;
}
