// ColorQuest: Hardware & Game Configuration
// Target: ESP32-C3 SuperMini + TCS34725 colour sensor + SSD1306 OLED

use crate::events::Tone;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 1;  // User button (INPUT_PULLUP, active LOW)
pub const PIN_BUZZER: i32 = 9;  // Passive piezo buzzer
pub const PIN_LED_R: i32 = 2;   // RGB indicator, red channel
pub const PIN_LED_G: i32 = 4;   // RGB indicator, green channel
pub const PIN_LED_B: i32 = 3;   // RGB indicator, blue channel
pub const PIN_I2C_SDA: i32 = 5; // I2C data line
pub const PIN_I2C_SCL: i32 = 6; // I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_TCS34725: u8 = 0x29;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks
pub const I2C_BAUDRATE_KHZ: u32 = 400;

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024
pub const LINE_HEIGHT: i32 = 10; // FONT_6X10

// ---------------------------------------------------------------------------
// Colour Sensor (TCS34725)
// ---------------------------------------------------------------------------
pub const SENSOR_INTEGRATION_MS: u64 = 50;
pub const SENSOR_ATIME: u8 = 0xEB; // 256 - 50 ms / 2.4 ms
pub const SENSOR_GAIN_4X: u8 = 0x01;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const TICK_INTERVAL_MS: u64 = 20;
pub const DEBOUNCE_MS: u64 = 30;
pub const LONG_PRESS_MS: u64 = 2000;
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 600;
pub const COUNTDOWN_STEPS: u8 = 3;
pub const COUNTDOWN_STEP_MS: u64 = 1000;
pub const ROUND_DURATION_MS: u64 = 60_000;
pub const TARGET_ANNOUNCE_MS: u64 = 2000;   // "Find <colour> object"
pub const MATCH_CELEBRATION_MS: u64 = 1000; // "MATCH!" before the next target
pub const ROUND_END_DISPLAY_MS: u64 = 3000;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------
pub const MATCH_AWARD: u32 = 1;

// ---------------------------------------------------------------------------
// Match Tolerances (Euclidean distance in normalised RGB space)
// Per-colour overrides live in the palette table.
// ---------------------------------------------------------------------------
pub const GAME_TOLERANCE_DEFAULT: f32 = 0.8;
pub const RECOGNITION_TOLERANCE_DEFAULT: f32 = 0.8;

// ---------------------------------------------------------------------------
// Buzzer Tones
// ---------------------------------------------------------------------------
pub const TONE_CLICK: Tone = Tone::new(200, 1000);
pub const TONE_EXIT: Tone = Tone::new(200, 1000);
pub const TONE_MODE_ENTER: Tone = Tone::new(200, 1400);
pub const TONE_SKIP: Tone = Tone::new(300, 1200);
pub const TONE_MATCH: Tone = Tone::new(500, 1500);
pub const TONE_COUNTDOWN: Tone = Tone::new(100, 800);
pub const TONE_ROUND_END: Tone = Tone::new(700, 600);

/// Runtime copy of the game timing, so the session can be driven with
/// shorter windows under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub long_press_ms: u64,
    pub double_click_window_ms: u64,
    pub countdown_steps: u8,
    pub countdown_step_ms: u64,
    pub round_duration_ms: u64,
    pub announce_ms: u64,
    pub celebration_ms: u64,
    pub round_end_ms: u64,
    pub match_award: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_MS,
            double_click_window_ms: DOUBLE_CLICK_WINDOW_MS,
            countdown_steps: COUNTDOWN_STEPS,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            round_duration_ms: ROUND_DURATION_MS,
            announce_ms: TARGET_ANNOUNCE_MS,
            celebration_ms: MATCH_CELEBRATION_MS,
            round_end_ms: ROUND_END_DISPLAY_MS,
            match_award: MATCH_AWARD,
        }
    }
}
