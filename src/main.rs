// ColorQuest: Firmware Entry Point
//
// Boot sequence:
//   1. Configure GPIO (button, buzzer, RGB indicator) and the I2C bus.
//   2. Bring up the TCS34725 colour sensor and the SSD1306 OLED. Either one
//      failing is fatal: the firmware halts instead of running on hardware
//      it could not verify.
//   3. Build the colour palette and the game session.
//   4. Run the single-threaded game loop forever.

#[cfg(target_os = "espidf")]
mod drivers;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::Mutex;

    use esp_idf_hal::gpio::{InputPin, OutputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use colorquest::config::*;
    use colorquest::events::LedPattern;
    use colorquest::palette::Palette;
    use colorquest::session::Session;
    use colorquest::tasks::game::game_loop;

    use crate::drivers::board::{EspBoard, EspRandom};
    use crate::drivers::buzzer::Buzzer;
    use crate::drivers::display::OledDisplay;
    use crate::drivers::rgb_led::RgbLed;
    use crate::drivers::tcs34725::Tcs34725;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("ColorQuest firmware starting");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // Pin picks below must agree with the numbers in config.rs.
    const _: () = assert!(
        PIN_BUTTON == 1
            && PIN_BUZZER == 9
            && PIN_LED_R == 2
            && PIN_LED_G == 4
            && PIN_LED_B == 3
            && PIN_I2C_SDA == 5
            && PIN_I2C_SCL == 6
    );

    // Button GPIO (pull-up, active LOW).
    let button = PinDriver::input(peripherals.pins.gpio1.downgrade_input())?; // PIN_BUTTON
    configure_pullup();

    let buzzer = Buzzer::new(PinDriver::output(peripherals.pins.gpio9.downgrade_output())?); // PIN_BUZZER
    let mut led = RgbLed::new(
        PinDriver::output(peripherals.pins.gpio2.downgrade_output())?, // PIN_LED_R
        PinDriver::output(peripherals.pins.gpio4.downgrade_output())?, // PIN_LED_G
        PinDriver::output(peripherals.pins.gpio3.downgrade_output())?, // PIN_LED_B
    );
    led.set(LedPattern::OFF);

    // ---- I2C bus (shared between TCS34725 and OLED) -----------------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio5, // PIN_I2C_SDA
        peripherals.pins.gpio6, // PIN_I2C_SCL
        &i2c_config,
    )?;
    // The bus lives for the entire programme (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

    // ---- Component bring-up -----------------------------------------------
    let sensor = Tcs34725::new(i2c_bus);
    if !sensor.is_connected() {
        halt("No TCS34725 found ... check your connections");
    }
    if let Err(e) = sensor.init() {
        log::error!("TCS34725 init failed: {}", e);
        halt("Colour sensor unavailable");
    }

    let mut display = OledDisplay::new(i2c_bus);
    if !display.is_connected() {
        halt("SSD1306 not responding");
    }
    if let Err(e) = display.init() {
        log::error!("SSD1306 init failed: {}", e);
        halt("Display unavailable");
    }

    // ---- Game -------------------------------------------------------------
    let palette = Palette::standard()?;
    log::info!(
        "Palette: {} colours, {} targets",
        palette.classes().len(),
        palette.targets().len()
    );

    let session = Session::new(GameConfig::default(), palette, EspRandom);
    let board = EspBoard::new(button, sensor, display, buzzer, led);

    log::info!("Boot complete, entering menu");
    game_loop(board, session)
}

/// Log the reason and park forever. Used for unrecoverable boot failures.
#[cfg(target_os = "espidf")]
fn halt(reason: &str) -> ! {
    log::error!("{} (halting)", reason);
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}

/// Enable the internal pull-up on the button pin.
#[cfg(target_os = "espidf")]
fn configure_pullup() {
    unsafe {
        esp_idf_sys::gpio_set_pull_mode(
            colorquest::config::PIN_BUTTON,
            esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY,
        );
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("ColorQuest firmware only runs on ESP-IDF targets; the game core is tested with `cargo test`")
}
