// ColorQuest: TCS34725 Colour Sensor Driver
//
// Register-level driver over the shared I2C bus. The sensor runs in
// continuous mode; each read returns the last completed integration.

use std::thread;
use std::time::Duration;

use anyhow::ensure;

use colorquest::color::RawSample;
use colorquest::config::*;

use super::SharedBus;

// TCS34725 register map
const COMMAND_BIT: u8 = 0x80;
const AUTO_INCREMENT: u8 = 0x20;
const REG_ENABLE: u8 = 0x00;
const REG_ATIME: u8 = 0x01;
const REG_CONTROL: u8 = 0x0F;
const REG_ID: u8 = 0x12;
const REG_CDATAL: u8 = 0x14; // Start of 8-byte C/R/G/B burst

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

// 0x44 = TCS34721/TCS34725, 0x4D = TCS34723/TCS34727
const ID_EXPECTED: [u8; 2] = [0x44, 0x4D];

pub struct Tcs34725 {
    bus: SharedBus,
}

impl Tcs34725 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device answers with a known part ID.
    pub fn is_connected(&self) -> bool {
        matches!(self.read_id(), Ok(id) if ID_EXPECTED.contains(&id))
    }

    /// Power on, set integration time and gain, and wait for the first
    /// integration cycle so the next read is valid.
    pub fn init(&self) -> anyhow::Result<()> {
        let id = self.read_id()?;
        ensure!(ID_EXPECTED.contains(&id), "unexpected TCS34725 id 0x{:02X}", id);

        self.write_reg(REG_ATIME, SENSOR_ATIME)?;
        self.write_reg(REG_CONTROL, SENSOR_GAIN_4X)?;

        // Oscillator needs 2.4 ms after PON before ADCs can be enabled.
        self.write_reg(REG_ENABLE, ENABLE_PON)?;
        thread::sleep(Duration::from_millis(3));
        self.write_reg(REG_ENABLE, ENABLE_PON | ENABLE_AEN)?;

        // Warm-up: one full integration before the data registers are valid.
        thread::sleep(Duration::from_millis(SENSOR_INTEGRATION_MS));

        log::info!(
            "TCS34725 initialised (id 0x{:02X}, {} ms, 4x gain)",
            id,
            SENSOR_INTEGRATION_MS
        );
        Ok(())
    }

    /// Burst-read clear, red, green and blue counts.
    pub fn read_raw(&self) -> anyhow::Result<RawSample> {
        let mut raw = [0u8; 8];
        {
            let mut bus = self.bus.lock().unwrap();
            bus.write_read(
                I2C_ADDR_TCS34725,
                &[COMMAND_BIT | AUTO_INCREMENT | REG_CDATAL],
                &mut raw,
                I2C_TIMEOUT_TICKS,
            )?;
        }

        Ok(RawSample {
            clear: u16::from_le_bytes([raw[0], raw[1]]),
            red: u16::from_le_bytes([raw[2], raw[3]]),
            green: u16::from_le_bytes([raw[4], raw[5]]),
            blue: u16::from_le_bytes([raw[6], raw[7]]),
        })
    }

    fn read_id(&self) -> anyhow::Result<u8> {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        bus.write_read(
            I2C_ADDR_TCS34725,
            &[COMMAND_BIT | REG_ID],
            &mut buf,
            I2C_TIMEOUT_TICKS,
        )?;
        Ok(buf[0])
    }

    fn write_reg(&self, reg: u8, value: u8) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap();
        bus.write(I2C_ADDR_TCS34725, &[COMMAND_BIT | reg, value], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }
}
