//! Signal record encoding and decoding.
//!
//! Record layout (7 bytes, transmitted as-is):
//! - KIND (1 byte): 0x01 = session reset, anything else = pitch call
//! - PITCH (1 byte): 0-4 = concrete pitch type, 0xFF = none
//! - ZONE (1 byte): 0 = unset, 1-9 = 3x3 target grid, row-major
//! - PICKOFF (1 byte): 0 = none, 1-3 = target base
//! - THIRD (1 byte): 0 = none, 1-4 = auxiliary sign A-D
//! - SEQUENCE (2 bytes): wrapping signal counter, little-endian

/// Size of an encoded signal record in bytes
pub const RECORD_SIZE: usize = 7;

/// Wire value for "no pitch selected"
///
/// Distinct from every concrete pitch value so a pickoff-only or
/// sign-only call never reads as a pitch.
pub const PITCH_NONE: u8 = 0xFF;

/// Wire value for a reset record's kind byte
const KIND_RESET: u8 = 0x01;

/// Errors that can occur during record decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireError {
    /// Received byte count does not match the fixed record size
    Length { got: usize },
}

/// Pitch types carried on the wire
///
/// Discriminants are the wire values. `Pitchout` is a real pitch value
/// on the link but is excluded from the coach's scoring counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Pitch {
    Fastball = 0,
    Curveball = 1,
    Changeup = 2,
    Slider = 3,
    Pitchout = 4,
}

impl Pitch {
    /// Parse a pitch from its wire byte
    ///
    /// Deployed receivers treat every value above 4 as "none", including
    /// the 0xFF sentinel; this mirrors that test exactly.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Pitch::Fastball),
            1 => Some(Pitch::Curveball),
            2 => Some(Pitch::Changeup),
            3 => Some(Pitch::Slider),
            4 => Some(Pitch::Pitchout),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Two-letter abbreviation shown on the receiver displays
    pub fn abbrev(&self) -> &'static str {
        match self {
            Pitch::Fastball => "FB",
            Pitch::Curveball => "CB",
            Pitch::Changeup => "CH",
            Pitch::Slider => "SL",
            Pitch::Pitchout => "PO",
        }
    }

    /// Whether this pitch participates in the coach's scoring counters
    pub fn is_scored(&self) -> bool {
        !matches!(self, Pitch::Pitchout)
    }
}

/// Discriminates what a record means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalKind {
    /// A pitch call; payload fields are meaningful
    #[default]
    Call,
    /// Session reset; receivers ignore the payload fields
    Reset,
}

/// The one entity on the wire
///
/// A decoded record is never semantically validated: out-of-range zones,
/// pickoffs and signs are carried through and tolerated by the receive
/// engine, matching what deployed units do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalRecord {
    /// Record discriminator
    pub kind: SignalKind,
    /// Pitch type; `None` for pickoff-only, sign-only or empty calls
    pub pitch: Option<Pitch>,
    /// Target zone, 0 = unset, 1-9 = grid cell
    pub zone: u8,
    /// Pickoff base, 0 = none, 1-3 = base
    pub pickoff: u8,
    /// Auxiliary sign, 0 = none, 1-4 = A-D
    pub third_sign: u8,
    /// Transmitter-authoritative wrapping counter
    pub sequence: u16,
}

impl SignalRecord {
    /// Build a session reset record
    ///
    /// The payload fields are zeroed; receivers must ignore them anyway.
    pub fn reset() -> Self {
        Self {
            kind: SignalKind::Reset,
            pitch: None,
            zone: 0,
            pickoff: 0,
            third_sign: 0,
            sequence: 0,
        }
    }

    /// Encode into the fixed wire layout
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let kind = match self.kind {
            SignalKind::Call => 0,
            SignalKind::Reset => KIND_RESET,
        };
        let pitch = self.pitch.map_or(PITCH_NONE, Pitch::to_byte);
        let seq = self.sequence.to_le_bytes();
        [
            kind,
            pitch,
            self.zone,
            self.pickoff,
            self.third_sign,
            seq[0],
            seq[1],
        ]
    }

    /// Decode from received bytes
    ///
    /// Fails only when the byte count is wrong. Every 7-byte pattern
    /// decodes: kind bytes other than 0x01 read as a call, pitch bytes
    /// above 4 read as "none".
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != RECORD_SIZE {
            return Err(WireError::Length { got: bytes.len() });
        }

        let kind = if bytes[0] == KIND_RESET {
            SignalKind::Reset
        } else {
            SignalKind::Call
        };

        Ok(Self {
            kind,
            pitch: Pitch::from_byte(bytes[1]),
            zone: bytes[2],
            pickoff: bytes[3],
            third_sign: bytes[4],
            sequence: u16::from_le_bytes([bytes[5], bytes[6]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_call_layout() {
        let record = SignalRecord {
            kind: SignalKind::Call,
            pitch: Some(Pitch::Changeup),
            zone: 5,
            pickoff: 0,
            third_sign: 0,
            sequence: 10,
        };
        let bytes = record.encode();

        assert_eq!(bytes, [0x00, 0x02, 0x05, 0x00, 0x00, 0x0A, 0x00]);
    }

    #[test]
    fn test_encode_no_pitch_uses_sentinel() {
        let record = SignalRecord {
            kind: SignalKind::Call,
            pitch: None,
            zone: 0,
            pickoff: 2,
            third_sign: 0,
            sequence: 1,
        };
        let bytes = record.encode();

        assert_eq!(bytes[1], PITCH_NONE);
    }

    #[test]
    fn test_sequence_is_little_endian() {
        let record = SignalRecord {
            sequence: 0x0201,
            ..SignalRecord::default()
        };
        let bytes = record.encode();

        assert_eq!(bytes[5], 0x01);
        assert_eq!(bytes[6], 0x02);
    }

    #[test]
    fn test_roundtrip() {
        let original = SignalRecord {
            kind: SignalKind::Call,
            pitch: Some(Pitch::Fastball),
            zone: 9,
            pickoff: 1,
            third_sign: 4,
            sequence: 65535,
        };
        let decoded = SignalRecord::decode(&original.encode()).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_sentinel_roundtrips_to_none() {
        let original = SignalRecord {
            pitch: None,
            pickoff: 3,
            ..SignalRecord::default()
        };
        let decoded = SignalRecord::decode(&original.encode()).unwrap();

        assert_eq!(decoded.pitch, None);
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            SignalRecord::decode(&[0; 6]),
            Err(WireError::Length { got: 6 })
        );
        assert_eq!(
            SignalRecord::decode(&[0; 8]),
            Err(WireError::Length { got: 8 })
        );
    }

    #[test]
    fn test_decode_permissive_kind_and_pitch() {
        // kind 7 is not a reset, pitch 9 is not a pitch
        let decoded = SignalRecord::decode(&[7, 9, 9, 0, 0, 0, 0]).unwrap();

        assert_eq!(decoded.kind, SignalKind::Call);
        assert_eq!(decoded.pitch, None);
        assert_eq!(decoded.zone, 9);
    }

    #[test]
    fn test_reset_record() {
        let decoded = SignalRecord::decode(&SignalRecord::reset().encode()).unwrap();

        assert_eq!(decoded.kind, SignalKind::Reset);
        assert_eq!(decoded.sequence, 0);
    }

    proptest! {
        /// Every 7-byte pattern decodes, and decoding is stable under
        /// one re-encode (the permissive mappings normalize once).
        #[test]
        fn decode_is_total(bytes in proptest::array::uniform7(any::<u8>())) {
            let first = SignalRecord::decode(&bytes).unwrap();
            let second = SignalRecord::decode(&first.encode()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
