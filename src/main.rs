//! Geopro 202S driver — firmware entry point.
//!
//! Wires the driver core to an ESP32 UART, registers the full entity
//! catalog against the logging publish adapter, and runs the tick loop.
//! Built only for the `espidf` target; host use goes through the
//! library crate.

#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{config::Config as UartConfig, UartDriver};
use esp_idf_hal::units::Hertz;
use log::info;

use geopro202s::adapters::log_sink::LogPublisher;
use geopro202s::adapters::time::Esp32TimeAdapter;
use geopro202s::adapters::uart::UartBus;
use geopro202s::app::ports::EndpointId;
use geopro202s::app::service::GeoproDriver;
use geopro202s::config::DriverConfig;
use geopro202s::protocol::ids;

/// Tick period. Well under the 100 ms inter-byte timeout, so a stalled
/// frame is noticed within one assembly window.
const TICK_MS: u32 = 20;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Geopro 202S driver v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let uart_config = UartConfig::new().baudrate(Hertz(9_600));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17, // TX → controller RX
        peripherals.pins.gpio16, // RX ← controller TX
        Option::<gpio::Gpio0>::None,
        Option::<gpio::Gpio1>::None,
        &uart_config,
    )?;
    let mut bus = UartBus::new(uart);

    let mut driver = GeoproDriver::new(DriverConfig::default())?;
    register_catalog(&mut driver)?;
    driver.log_summary();

    let mut sink = LogPublisher::new();
    let clock = Esp32TimeAdapter::new();

    loop {
        driver.tick(&mut bus, &mut sink, clock.uptime_ms());
        FreeRtos::delay_ms(TICK_MS);
    }
}

/// Register every known entity, one endpoint per catalog row. The
/// endpoint numbering here is only meaningful to [`LogPublisher`];
/// richer integrations assign their own.
fn register_catalog(driver: &mut GeoproDriver) -> Result<()> {
    let mut next = 0u16;
    let mut endpoint = || {
        let ep = EndpointId(next);
        next += 1;
        ep
    };

    for (id, name) in ids::TEMPERATURE_CATALOG {
        let ep = endpoint();
        info!("endpoint {} = temperature '{}' (0x{:02X})", ep.0, name, id);
        driver.register_temperature(*id, ep)?;
    }
    for (id, name) in ids::VALVE_CATALOG {
        let ep = endpoint();
        info!("endpoint {} = valve '{}' (0x{:02X})", ep.0, name, id);
        driver.register_valve(*id, ep)?;
    }
    for (id, name) in ids::HOUR_CATALOG {
        let ep = endpoint();
        info!("endpoint {} = hour counter '{}' (0x{:02X})", ep.0, name, id);
        driver.register_hour_counter(*id, ep)?;
    }
    for (mask, name) in ids::STATUS_BIT_CATALOG {
        let ep = endpoint();
        info!("endpoint {} = status bit '{}' (mask 0x{:02X})", ep.0, name, mask);
        driver.register_status_bit(*mask, ep)?;
    }
    let ep = endpoint();
    info!("endpoint {} = status word", ep.0);
    driver.register_status_word(ep);

    Ok(())
}
