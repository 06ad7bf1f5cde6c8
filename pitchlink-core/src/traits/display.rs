//! Display collaborator trait
//!
//! The core never draws. It hands a render intent to the sink; fonts,
//! colors and pixel layout are the sink's problem. The intent enum is
//! the stable contract point between the shared core and every display
//! technology on the link.

use crate::engine::RenderIntent;

/// Broad display capability class of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayClass {
    /// Full-screen color panel (watch/handheld units)
    FullColor,
    /// Small monochrome tile (stick/pocket units)
    MonoTile,
}

/// Trait for the device display
pub trait RenderSink {
    /// Capability class of this sink
    fn class(&self) -> DisplayClass;

    /// Present a render intent
    ///
    /// Never fails observably to the core; a sink that loses its panel
    /// swallows the intent.
    fn render(&mut self, intent: &RenderIntent);
}
