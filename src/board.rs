// ColorQuest: Hardware Collaborators
//
// The session only talks to the outside world through these traits. The
// firmware implements them over the ESP32 peripherals; tests implement them
// with scripted fakes.

use crate::color::RawSample;
use crate::events::{LedPattern, Tone};
use crate::screen::Screen;

/// Everything one tick needs from the hardware.
pub trait Board {
    /// Monotonic milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Current debounced-or-raw button level, `true` while held down.
    fn button_pressed(&mut self) -> bool;

    /// One colour sensor poll.
    fn acquire(&mut self) -> anyhow::Result<RawSample>;

    /// Fire-and-forget buzzer request. May block for the tone's duration.
    fn tone(&mut self, tone: Tone);

    /// Fire-and-forget RGB indicator request.
    fn indicate(&mut self, pattern: LedPattern);

    /// Draw one frame.
    fn present(&mut self, screen: &Screen) -> anyhow::Result<()>;
}

pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}
