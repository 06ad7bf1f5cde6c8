//! Coach processing cycle
//!
//! Maps discrete input events (debouncing and hit-testing belong to the
//! input collaborator) onto the selection machine and hands finished
//! records to the link. Transmission blocks for on-air time; at SF10
//! over 125 kHz that is tens of milliseconds, short enough to eat on
//! the main cycle.

use pitchlink_protocol::{LinkParams, Pitch};

use crate::link::{LinkError, RadioLink};
use crate::select::Selection;
use crate::traits::RadioDriver;

/// Minimum interval between transmissions, in milliseconds
///
/// Keeps a nervous thumb from flooding the channel; matches the
/// deployed coach units.
pub const TX_COOLDOWN_MS: u64 = 100;

/// Discrete input events delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoachEvent {
    TogglePitch(Pitch),
    ToggleZone(u8),
    TogglePickoff(u8),
    ToggleThirdSign(u8),
    Send,
    Reset,
    Undo,
}

/// Errors surfaced to the coach UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoachError {
    /// Send or reset refused inside the cooldown window; nothing
    /// changed, try again shortly
    Cooldown,
    /// The record went to the radio and the radio failed; the selection
    /// is already cleared and will not be re-populated
    Transmit(LinkError),
}

/// One transmitting device: selection machine plus link
pub struct CoachDevice<R> {
    selection: Selection,
    link: RadioLink<R>,
    link_up: bool,
    last_tx_ms: Option<u64>,
}

impl<R: RadioDriver> CoachDevice<R> {
    /// Assemble a coach unit around its transceiver
    pub fn new(radio: R) -> Self {
        Self {
            selection: Selection::new(),
            link: RadioLink::new(radio),
            link_up: false,
            last_tx_ms: None,
        }
    }

    /// Configure the link
    ///
    /// On failure the unit keeps running so the coach sees a "radio
    /// failed" state instead of a dead handheld; send events then
    /// surface the stored init error.
    pub fn start(&mut self, params: &LinkParams) -> Result<(), LinkError> {
        let outcome = self.link.configure(params);
        self.link_up = outcome.is_ok();
        outcome
    }

    /// Apply one input event
    ///
    /// `now_ms` is the device uptime, used only for the transmit
    /// cooldown.
    pub fn apply(&mut self, event: CoachEvent, now_ms: u64) -> Result<(), CoachError> {
        match event {
            CoachEvent::TogglePitch(pitch) => {
                self.selection.toggle_pitch(pitch);
                Ok(())
            }
            CoachEvent::ToggleZone(zone) => {
                self.selection.toggle_zone(zone);
                Ok(())
            }
            CoachEvent::TogglePickoff(base) => {
                self.selection.toggle_pickoff(base);
                Ok(())
            }
            CoachEvent::ToggleThirdSign(sign) => {
                self.selection.toggle_third_sign(sign);
                Ok(())
            }
            CoachEvent::Send => self.transmit_now(now_ms, Selection::send),
            CoachEvent::Reset => self.transmit_now(now_ms, Selection::reset),
            CoachEvent::Undo => {
                self.selection.undo();
                Ok(())
            }
        }
    }

    /// Cooldown-gate, run the state transition, hand off to the radio
    ///
    /// The cooldown check happens before the machine mutates so a
    /// refused event has no side effects at all. The machine mutates
    /// before the radio runs so a transmit failure cannot un-clear the
    /// selection.
    fn transmit_now(
        &mut self,
        now_ms: u64,
        emit: fn(&mut Selection) -> pitchlink_protocol::SignalRecord,
    ) -> Result<(), CoachError> {
        if let Some(last) = self.last_tx_ms {
            if now_ms.saturating_sub(last) < TX_COOLDOWN_MS {
                return Err(CoachError::Cooldown);
            }
        }

        let record = emit(&mut self.selection);
        self.last_tx_ms = Some(now_ms);
        self.link
            .transmit(&record)
            .map_err(CoachError::Transmit)
    }

    /// Whether the link came up at startup
    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    /// The selection machine, for the coach UI to render from
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}
