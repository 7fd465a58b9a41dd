// ColorQuest: Input Events & Actuator Requests

// ---------------------------------------------------------------------------
// Gesture Events (produced by the input recognizer)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Button released quickly, not part of a double-click.
    ShortClick,
    /// Second release inside the double-click window.
    DoubleClick,
    /// Button held past the long-press threshold (fires once per press).
    LongPress,
}

// ---------------------------------------------------------------------------
// Buzzer
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub duration_ms: u32,
    pub frequency_hz: u32,
}

impl Tone {
    pub const fn new(duration_ms: u32, frequency_hz: u32) -> Self {
        Self {
            duration_ms,
            frequency_hz,
        }
    }
}

// ---------------------------------------------------------------------------
// RGB Indicator (each channel is either fully on or off)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedPattern {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl LedPattern {
    pub const OFF: Self = Self {
        red: false,
        green: false,
        blue: false,
    };
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuChoice {
    #[default]
    Game,
    Detection,
}

impl MenuChoice {
    pub fn toggled(self) -> Self {
        match self {
            Self::Game => Self::Detection,
            Self::Detection => Self::Game,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Game => "Game",
            Self::Detection => "Detect colour",
        }
    }
}
