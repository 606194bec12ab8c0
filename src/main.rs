//! Greenthumb firmware — main entry point.
//!
//! Bring-up order: logger → tick timer → GPIO power-up → watering loop.
//! The loop never returns; there is no shutdown path on this board.

#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use greenthumb::adapters::drain::LcgDrain;
use greenthumb::adapters::gpio::GpioAdapter;
use greenthumb::adapters::log_sink::LogReportSink;
use greenthumb::config::SystemConfig;
use greenthumb::controller::WateringController;
use greenthumb::drivers::led::Led;
use greenthumb::drivers::tick_timer::TickTimer;
use greenthumb::pins;
use greenthumb::ports::GpioPort;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Plant watering system — greenthumb v{}", env!("CARGO_PKG_VERSION"));
    info!("Tick timer: {} Hz", TickTimer::FREQUENCY_HZ);

    // ── 2. Tick timer ─────────────────────────────────────────
    let mut timer = TickTimer::new();
    timer.start();

    // ── 3. GPIO bring-up ──────────────────────────────────────
    let mut gpio = GpioAdapter::new();

    let leds = pins::LED_BITS.map(|bit| Led::new(pins::LED_BANK, bit, pins::LED_ACTIVE_LOW));

    let config = SystemConfig::default();
    let max_drain = config.max_daily_drain;

    let mut controller = WateringController::new(leds, config);
    controller.power_up(&mut gpio);

    // Push-button line: configured at bring-up, read by a future
    // manual-override path.
    gpio.configure_input(pins::BUTTON_BANK, 1 << pins::BUTTON_BIT);

    // ── 4. Simulation collaborators ───────────────────────────
    // Seed 1 matches the C library's unseeded rand() sequence.
    let mut drain = LcgDrain::new(1, max_drain);
    let mut sink = LogReportSink::new();

    info!("System ready. Entering watering loop.");

    // ── 5. Watering loop (never returns) ──────────────────────
    controller.run(&mut gpio, &timer, &mut drain, &mut sink)
}
