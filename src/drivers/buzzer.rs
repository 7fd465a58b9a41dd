// ColorQuest: Piezo Buzzer Driver
//
// Passive buzzer on a plain GPIO, driven with a bit-banged square wave.

use std::thread;
use std::time::Duration;

use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use colorquest::events::Tone;

pub struct Buzzer<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> Buzzer<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>) -> Self {
        Self { pin }
    }

    /// Play `tone` (blocks the calling thread for its duration).
    pub fn play(&mut self, tone: Tone) {
        if tone.frequency_hz == 0 {
            thread::sleep(Duration::from_millis(u64::from(tone.duration_ms)));
            return;
        }

        let half_period_us = 500_000 / tone.frequency_hz;
        let cycles = u64::from(tone.duration_ms) * u64::from(tone.frequency_hz) / 1000;

        for _ in 0..cycles {
            let _ = self.pin.set_high();
            Ets::delay_us(half_period_us);
            let _ = self.pin.set_low();
            Ets::delay_us(half_period_us);
        }
    }
}
