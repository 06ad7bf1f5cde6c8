//! Haptic pattern mapping
//!
//! Chosen in parallel with the display intent so a player who never
//! looks at the wrist still gets the call. Patterns are distinct per
//! pitch type; lifecycle intents are silent.

use pitchlink_protocol::Pitch;

use super::intent::RenderIntent;

/// Short pulse length in milliseconds
pub const PULSE_SHORT_MS: u16 = 100;
/// Long pulse length in milliseconds
pub const PULSE_LONG_MS: u16 = 400;
/// Rapid pulse length for the pickoff triple
pub const PULSE_RAPID_MS: u16 = 60;
/// Gap between pulses within a pattern
pub const PULSE_GAP_MS: u16 = 120;

/// One named haptic pattern: `count` pulses of `on_ms`, separated by
/// `off_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulsePattern {
    pub count: u8,
    pub on_ms: u16,
    pub off_ms: u16,
}

impl PulsePattern {
    const fn shorts(count: u8) -> Self {
        Self {
            count,
            on_ms: PULSE_SHORT_MS,
            off_ms: PULSE_GAP_MS,
        }
    }

    const fn longs(count: u8) -> Self {
        Self {
            count,
            on_ms: PULSE_LONG_MS,
            off_ms: PULSE_GAP_MS,
        }
    }

    const fn rapid_triple() -> Self {
        Self {
            count: 3,
            on_ms: PULSE_RAPID_MS,
            off_ms: PULSE_RAPID_MS,
        }
    }
}

fn pitch_pattern(pitch: Pitch) -> PulsePattern {
    match pitch {
        Pitch::Fastball => PulsePattern::shorts(1),
        Pitch::Curveball => PulsePattern::shorts(2),
        Pitch::Changeup => PulsePattern::shorts(3),
        Pitch::Slider => PulsePattern::longs(1),
        Pitch::Pitchout => PulsePattern::longs(2),
    }
}

/// Pattern for an intent, `None` when the intent is silent
///
/// Composite calls use the pitch pattern when a concrete pitch is
/// present, otherwise fall back to the pickoff/third-sign patterns in
/// the same precedence as the display.
pub fn pattern_for(intent: &RenderIntent) -> Option<PulsePattern> {
    match intent {
        RenderIntent::Startup { .. } | RenderIntent::Waiting => None,
        RenderIntent::Reset { .. } => Some(PulsePattern::longs(1)),
        RenderIntent::PickoffOnly { .. } => Some(PulsePattern::rapid_triple()),
        RenderIntent::ThirdSignOnly { .. } => Some(PulsePattern::longs(2)),
        RenderIntent::Call {
            pitch: Some(pitch), ..
        } => Some(pitch_pattern(*pitch)),
        RenderIntent::Call {
            pitch: None,
            pickoff,
            third_sign,
            ..
        } => {
            if *pickoff > 0 {
                Some(PulsePattern::rapid_triple())
            } else if *third_sign > 0 {
                Some(PulsePattern::longs(2))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_patterns_are_distinct() {
        let patterns = [
            pitch_pattern(Pitch::Fastball),
            pitch_pattern(Pitch::Curveball),
            pitch_pattern(Pitch::Changeup),
            pitch_pattern(Pitch::Slider),
            pitch_pattern(Pitch::Pitchout),
        ];

        for (i, a) in patterns.iter().enumerate() {
            for b in &patterns[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_composite_uses_pitch_pattern() {
        let intent = RenderIntent::Call {
            pitch: Some(Pitch::Fastball),
            zone: 5,
            pickoff: 2,
            third_sign: 1,
            sequence: 1,
        };

        assert_eq!(pattern_for(&intent), Some(PulsePattern::shorts(1)));
    }

    #[test]
    fn test_empty_call_is_silent() {
        let intent = RenderIntent::Call {
            pitch: None,
            zone: 0,
            pickoff: 0,
            third_sign: 0,
            sequence: 1,
        };

        assert_eq!(pattern_for(&intent), None);
    }

    #[test]
    fn test_lifecycle_intents_are_silent() {
        assert_eq!(pattern_for(&RenderIntent::Waiting), None);
        assert_eq!(pattern_for(&RenderIntent::Startup { radio_ok: true }), None);
    }

    #[test]
    fn test_reset_is_one_long() {
        assert_eq!(
            pattern_for(&RenderIntent::Reset { sequence: 0 }),
            Some(PulsePattern::longs(1))
        );
    }
}
