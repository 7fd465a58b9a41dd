// ColorQuest: ESP32 Board
//
// Binds the session's collaborator traits to the real peripherals.

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use colorquest::board::{Board, RandomSource};
use colorquest::color::RawSample;
use colorquest::config::*;
use colorquest::events::{LedPattern, Tone};
use colorquest::input::Debouncer;
use colorquest::screen::Screen;

use super::buzzer::Buzzer;
use super::display::OledDisplay;
use super::rgb_led::RgbLed;
use super::tcs34725::Tcs34725;

/// Milliseconds since boot from the high-resolution ESP timer.
pub fn now_ms() -> u64 {
    let us = unsafe { esp_idf_sys::esp_timer_get_time() };
    u64::try_from(us / 1000).unwrap_or(0)
}

pub struct EspBoard {
    button: PinDriver<'static, AnyInputPin, Input>,
    debouncer: Debouncer,
    sensor: Tcs34725,
    display: OledDisplay,
    buzzer: Buzzer<'static>,
    led: RgbLed<'static>,
}

impl EspBoard {
    pub fn new(
        button: PinDriver<'static, AnyInputPin, Input>,
        sensor: Tcs34725,
        display: OledDisplay,
        buzzer: Buzzer<'static>,
        led: RgbLed<'static>,
    ) -> Self {
        Self {
            button,
            debouncer: Debouncer::new(DEBOUNCE_MS),
            sensor,
            display,
            buzzer,
            led,
        }
    }
}

impl Board for EspBoard {
    fn now_ms(&self) -> u64 {
        now_ms()
    }

    fn button_pressed(&mut self) -> bool {
        let raw = self.button.is_low(); // active LOW
        self.debouncer.update(raw, now_ms())
    }

    fn acquire(&mut self) -> anyhow::Result<RawSample> {
        self.sensor.read_raw()
    }

    fn tone(&mut self, tone: Tone) {
        self.buzzer.play(tone);
    }

    fn indicate(&mut self, pattern: LedPattern) {
        self.led.set(pattern);
    }

    fn present(&mut self, screen: &Screen) -> anyhow::Result<()> {
        self.display.present(screen)
    }
}

/// Hardware RNG (true random once the radio or bootloader entropy is up).
pub struct EspRandom;

impl RandomSource for EspRandom {
    fn next_u32(&mut self) -> u32 {
        unsafe { esp_idf_sys::esp_random() }
    }
}
