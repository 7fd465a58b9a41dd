// ColorQuest: Core Library
//
// Hardware-independent part of the colour-matching game: chromaticity
// normalisation, palette classification, button gesture recognition and the
// session state machine. The firmware binary wires these to the ESP32
// peripherals through the `board::Board` trait.

pub mod board;
pub mod color;
pub mod config;
pub mod events;
pub mod input;
pub mod palette;
pub mod screen;
pub mod session;
pub mod target;
pub mod tasks;

pub use board::{Board, RandomSource};
pub use color::{Chromaticity, RawSample};
pub use events::{GestureEvent, LedPattern, MenuChoice, Tone};
pub use palette::{classify, ColorClass, ColorId, Context, Palette, Verdict};
pub use screen::Screen;
pub use session::{Mode, Session};
