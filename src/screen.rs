// ColorQuest: Display Content
//
// A `Screen` describes what the OLED should show for the current mode. The
// session builds one per tick; `render` draws it with embedded-graphics onto
// any monochrome draw target (the SSD1306 framebuffer on hardware).

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::color::Chromaticity;
use crate::config::LINE_HEIGHT;
use crate::events::MenuChoice;
use crate::palette::ColorId;

/// Best match shown in detection mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detected {
    pub id: ColorId,
    pub distance: f32,
    /// Distance is inside the recognition tolerance for `id`.
    pub confident: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu {
        selection: MenuChoice,
    },
    Countdown {
        remaining: u8,
    },
    Announce {
        target: ColorId,
    },
    Seeking {
        target: ColorId,
        score: u32,
        seconds_left: u64,
        sample: Option<Chromaticity>,
    },
    Matched {
        score: u32,
        found_in_ms: u64,
    },
    RoundOver {
        score: u32,
    },
    Detection {
        detected: Option<Detected>,
        sample: Option<Chromaticity>,
        clear: u16,
    },
}

impl Screen {
    /// Text lines, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Menu { selection } => {
                let mut lines = vec!["ColorQuest".to_string(), String::new()];
                for choice in [MenuChoice::Game, MenuChoice::Detection] {
                    let cursor = if choice == *selection { '>' } else { ' ' };
                    lines.push(format!("{} {}", cursor, choice.label()));
                }
                lines.push(String::new());
                lines.push("Click:move Hold:start".to_string());
                lines
            }

            Self::Countdown { remaining } => vec![
                "Get ready!".to_string(),
                String::new(),
                format!("    {}", remaining),
            ],

            Self::Announce { target } => vec![format!("Find {} object", target.name())],

            Self::Seeking {
                target,
                score,
                seconds_left,
                sample,
            } => {
                let mut lines = vec![
                    format!("Target: {}", target.name()),
                    format!("Score: {}  {}s", score, seconds_left),
                    "Detected:".to_string(),
                ];
                lines.push(match sample {
                    Some(c) => format!("R:{:.2} G:{:.2} B:{:.2}", c.r, c.g, c.b),
                    None => "R:-- G:-- B:--".to_string(),
                });
                lines
            }

            Self::Matched { score, found_in_ms } => vec![
                "MATCH!".to_string(),
                format!("Time: {} ms", found_in_ms),
                format!("Score: {}", score),
            ],

            Self::RoundOver { score } => vec![
                "Time's up!".to_string(),
                String::new(),
                format!("Final score: {}", score),
            ],

            Self::Detection {
                detected,
                sample,
                clear,
            } => {
                let name = match detected {
                    Some(d) if d.confident => d.id.name().to_string(),
                    Some(d) => format!("{}?", d.id.name()),
                    None => "--".to_string(),
                };
                let mut lines = vec![format!("Color: {}", name)];
                match sample {
                    Some(c) => {
                        lines.push(format!("R:{:.2} G:{:.2}", c.r, c.g));
                        lines.push(format!("B:{:.2} C:{}", c.b, clear));
                    }
                    None => {
                        lines.push("R:-- G:--".to_string());
                        lines.push(format!("B:-- C:{}", clear));
                    }
                }
                lines.push(String::new());
                lines.push("Hold: menu".to_string());
                lines
            }
        }
    }
}

/// Clear `target` and draw `screen` as left-aligned text lines.
pub fn render<D>(screen: &Screen, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    target.clear(BinaryColor::Off)?;
    for (row, line) in screen.lines().iter().enumerate() {
        let y = row as i32 * LINE_HEIGHT;
        Text::with_baseline(line, Point::new(0, y), style, Baseline::Top).draw(target)?;
    }
    Ok(())
}
