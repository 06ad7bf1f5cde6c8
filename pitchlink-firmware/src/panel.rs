//! defmt render sink
//!
//! Reference display adapter: every intent becomes one log line. Pixel
//! rendering is per-board presentation and lives outside the shared
//! core; a board with a panel replaces this sink and nothing else.

use core::fmt::Write;

use heapless::String;

use pitchlink_core::engine::RenderIntent;
use pitchlink_core::traits::{DisplayClass, RenderSink};

/// One log line is plenty for a composite call
const LINE_LEN: usize = 32;

/// Render sink that logs intents over RTT
pub struct DefmtPanel;

impl DefmtPanel {
    pub fn new() -> Self {
        Self
    }
}

impl RenderSink for DefmtPanel {
    fn class(&self) -> DisplayClass {
        DisplayClass::MonoTile
    }

    fn render(&mut self, intent: &RenderIntent) {
        match intent {
            RenderIntent::Startup { radio_ok: true } => defmt::info!("panel: ready"),
            RenderIntent::Startup { radio_ok: false } => defmt::info!("panel: RADIO FAILED"),
            RenderIntent::Waiting => defmt::info!("panel: waiting"),
            RenderIntent::Reset { sequence } => defmt::info!("panel: RESET #{=u16}", *sequence),
            RenderIntent::PickoffOnly { base, sequence } => {
                defmt::info!("panel: PK{=u8} #{=u16}", *base, *sequence)
            }
            RenderIntent::ThirdSignOnly { sign, sequence } => {
                defmt::info!("panel: 3{=char} #{=u16}", sign_letter(*sign), *sequence)
            }
            RenderIntent::Call {
                pitch,
                zone,
                pickoff,
                third_sign,
                sequence,
            } => {
                let mut line: String<LINE_LEN> = String::new();
                if let Some(pitch) = pitch {
                    let _ = line.push_str(pitch.abbrev());
                }
                if (1..=9).contains(zone) {
                    let _ = write!(line, " {}", zone);
                }
                if *pickoff > 0 {
                    let _ = write!(line, " PK{}", pickoff);
                }
                if *third_sign > 0 {
                    let _ = write!(line, " 3{}", sign_letter(*third_sign));
                }
                defmt::info!("panel:{=str} #{=u16}", line.as_str(), *sequence);
            }
        }
    }
}

fn sign_letter(sign: u8) -> char {
    match sign {
        1..=4 => (b'A' + sign - 1) as char,
        _ => '?',
    }
}
