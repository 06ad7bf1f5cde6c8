//! Transmit-side selection state machine
//!
//! Accumulates the coach's toggles into a pending call, emits it as a
//! signal record on send, and keeps the session bookkeeping: per-pitch
//! scoring counters, cumulative send count, wrapping sequence number and
//! the one-deep undo snapshot. Pure state; the coach device wires it to
//! the link.

use pitchlink_protocol::{Pitch, SignalKind, SignalRecord};

/// Coarse phase of the selection machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectPhase {
    /// No field selected
    Idle,
    /// At least one field selected
    Composing,
}

/// The four independently toggleable call fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pending {
    pub pitch: Option<Pitch>,
    pub zone: u8,
    pub pickoff: u8,
    pub third_sign: u8,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.pitch.is_none() && self.zone == 0 && self.pickoff == 0 && self.third_sign == 0
    }
}

/// Per-pitch-type scoring counters
///
/// Pitchout is a real pitch on the wire but deliberately has no counter;
/// it is a throwaway, not a scored call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PitchCounts {
    pub fastball: u16,
    pub curveball: u16,
    pub changeup: u16,
    pub slider: u16,
}

impl PitchCounts {
    fn tally(&mut self, pitch: Pitch) {
        match pitch {
            Pitch::Fastball => self.fastball = self.fastball.wrapping_add(1),
            Pitch::Curveball => self.curveball = self.curveball.wrapping_add(1),
            Pitch::Changeup => self.changeup = self.changeup.wrapping_add(1),
            Pitch::Slider => self.slider = self.slider.wrapping_add(1),
            Pitch::Pitchout => {}
        }
    }

    /// Counter value for a pitch type; always 0 for pitchout
    pub fn count(&self, pitch: Pitch) -> u16 {
        match pitch {
            Pitch::Fastball => self.fastball,
            Pitch::Curveball => self.curveball,
            Pitch::Changeup => self.changeup,
            Pitch::Slider => self.slider,
            Pitch::Pitchout => 0,
        }
    }
}

/// Transmitter selection state
///
/// Created at startup, mutated by input events, never persisted across
/// power cycles.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pending: Pending,
    counts: PitchCounts,
    sends: u16,
    sequence: u16,
    undo_snapshot: Option<Pending>,
}

impl Selection {
    /// Fresh session: nothing selected, all counters zero, sequence 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the pitch field; selecting the current value clears it
    pub fn toggle_pitch(&mut self, pitch: Pitch) {
        self.pending.pitch = if self.pending.pitch == Some(pitch) {
            None
        } else {
            Some(pitch)
        };
    }

    /// Toggle the target zone; selecting the current value clears it
    pub fn toggle_zone(&mut self, zone: u8) {
        self.pending.zone = if self.pending.zone == zone { 0 } else { zone };
    }

    /// Toggle the pickoff base; selecting the current value clears it
    pub fn toggle_pickoff(&mut self, base: u8) {
        self.pending.pickoff = if self.pending.pickoff == base { 0 } else { base };
    }

    /// Toggle the auxiliary sign; selecting the current value clears it
    pub fn toggle_third_sign(&mut self, sign: u8) {
        self.pending.third_sign = if self.pending.third_sign == sign { 0 } else { sign };
    }

    /// Snapshot the pending call into an outgoing record
    ///
    /// Bumps the sequence and the bookkeeping, saves the undo snapshot
    /// and clears the selection. The clear is unconditional: whether the
    /// subsequent transmission succeeds is not this machine's concern.
    pub fn send(&mut self) -> SignalRecord {
        self.sequence = self.sequence.wrapping_add(1);
        self.sends = self.sends.wrapping_add(1);

        if let Some(pitch) = self.pending.pitch {
            if pitch.is_scored() {
                self.counts.tally(pitch);
            }
        }

        let record = SignalRecord {
            kind: SignalKind::Call,
            pitch: self.pending.pitch,
            zone: self.pending.zone,
            pickoff: self.pending.pickoff,
            third_sign: self.pending.third_sign,
            sequence: self.sequence,
        };

        self.undo_snapshot = Some(self.pending);
        self.pending = Pending::default();
        record
    }

    /// Reset the session: selection, counters, send count and sequence
    /// all return to zero; emits the reset record to broadcast
    pub fn reset(&mut self) -> SignalRecord {
        self.pending = Pending::default();
        self.counts = PitchCounts::default();
        self.sends = 0;
        self.sequence = 0;
        self.undo_snapshot = None;
        SignalRecord::reset()
    }

    /// Restore the pre-send selection locally
    ///
    /// One-shot: the snapshot is consumed. Counters and sequence keep
    /// their post-send values, and nothing is retransmitted; undo cannot
    /// recall a call the receivers have already rendered.
    pub fn undo(&mut self) -> bool {
        match self.undo_snapshot.take() {
            Some(snapshot) => {
                self.pending = snapshot;
                true
            }
            None => false,
        }
    }

    /// Current phase
    pub fn phase(&self) -> SelectPhase {
        if self.pending.is_empty() {
            SelectPhase::Idle
        } else {
            SelectPhase::Composing
        }
    }

    /// The pending call fields
    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    /// Scoring counters
    pub fn counts(&self) -> &PitchCounts {
        &self.counts
    }

    /// Cumulative sends this session
    pub fn sends(&self) -> u16 {
        self.sends
    }

    /// Sequence number of the most recent send
    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}
