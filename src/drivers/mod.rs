use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

pub mod board;
pub mod buzzer;
pub mod display;
pub mod rgb_led;
pub mod tcs34725;

/// Thread-safe handle to the I2C bus shared by the sensor and the OLED.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;
