//! Decode & priority engine
//!
//! Classification follows a fixed precedence and is total: any record,
//! including nonsensical field combinations that the permissive codec
//! lets through, produces exactly one intent. Every receiver variant
//! must apply this order identically or the fleet renders differently
//! from the same transmission.

use pitchlink_protocol::{Pitch, SignalKind, SignalRecord};

/// What a receiver should present
///
/// `Startup` and `Waiting` are device-lifecycle intents produced by the
/// device cycle rather than by classification; they share the enum so a
/// render sink has a single entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderIntent {
    /// Boot status screen; the only user-visible radio-failure surface
    Startup { radio_ok: bool },
    /// No signal for the quiet period
    Waiting,
    /// Session reset
    Reset { sequence: u16 },
    /// Pickoff call with no pitch
    PickoffOnly { base: u8, sequence: u16 },
    /// Auxiliary sign with no pitch and no pickoff
    ThirdSignOnly { sign: u8, sequence: u16 },
    /// Composite pitch call carrying all four fields
    Call {
        pitch: Option<Pitch>,
        zone: u8,
        pickoff: u8,
        third_sign: u8,
        sequence: u16,
    },
}

/// Classify a record into its render intent
///
/// Precedence, first match wins:
/// 1. reset kind
/// 2. no pitch, pickoff set
/// 3. no pitch, third sign set
/// 4. composite call (pitch may still be none: the degenerate but valid
///    empty call)
pub fn classify(record: &SignalRecord) -> RenderIntent {
    if record.kind == SignalKind::Reset {
        return RenderIntent::Reset {
            sequence: record.sequence,
        };
    }

    if record.pitch.is_none() && record.pickoff > 0 {
        return RenderIntent::PickoffOnly {
            base: record.pickoff,
            sequence: record.sequence,
        };
    }

    if record.pitch.is_none() && record.third_sign > 0 {
        return RenderIntent::ThirdSignOnly {
            sign: record.third_sign,
            sequence: record.sequence,
        };
    }

    RenderIntent::Call {
        pitch: record.pitch,
        zone: record.zone,
        pickoff: record.pickoff,
        third_sign: record.third_sign,
        sequence: record.sequence,
    }
}
