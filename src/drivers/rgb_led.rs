// ColorQuest: RGB Indicator LED
//
// Common-cathode LED, one GPIO per channel, each channel on or off.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use colorquest::events::LedPattern;

pub struct RgbLed<'d> {
    red: PinDriver<'d, AnyOutputPin, Output>,
    green: PinDriver<'d, AnyOutputPin, Output>,
    blue: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> RgbLed<'d> {
    pub fn new(
        red: PinDriver<'d, AnyOutputPin, Output>,
        green: PinDriver<'d, AnyOutputPin, Output>,
        blue: PinDriver<'d, AnyOutputPin, Output>,
    ) -> Self {
        Self { red, green, blue }
    }

    pub fn set(&mut self, pattern: LedPattern) {
        let _ = Self::drive(&mut self.red, pattern.red);
        let _ = Self::drive(&mut self.green, pattern.green);
        let _ = Self::drive(&mut self.blue, pattern.blue);
    }

    fn drive(pin: &mut PinDriver<'d, AnyOutputPin, Output>, on: bool) -> anyhow::Result<()> {
        if on {
            pin.set_high()?;
        } else {
            pin.set_low()?;
        }
        Ok(())
    }
}
