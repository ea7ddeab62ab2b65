//! Port traits — the boundary between the driver core and its host.
//!
//! ```text
//!   serial bus ──▶ BusPort ──▶ GeoproDriver ──▶ PublishPort ──▶ host sensors
//! ```
//!
//! The host implements these traits and injects them into
//! [`GeoproDriver::tick`](super::service::GeoproDriver::tick); the core
//! never touches a UART or a sensor object directly, which keeps the
//! whole protocol path testable with mocks.

use crate::error::BusError;

// ───────────────────────────────────────────────────────────────
// Bus port (driven adapter: serial transport ↔ driver)
// ───────────────────────────────────────────────────────────────

/// Non-blocking byte-stream access to the device bus.
///
/// `read_byte` must never wait for data: the driver drains whatever is
/// already buffered and returns. Writes are short fixed-size frames.
pub trait BusPort {
    /// Next buffered inbound byte, or `None` when the bus is drained.
    fn read_byte(&mut self) -> Option<u8>;

    /// Transmit one complete outbound frame.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), BusError>;
}

// ───────────────────────────────────────────────────────────────
// Publish port (driven adapter: driver → host sensor endpoints)
// ───────────────────────────────────────────────────────────────

/// Opaque handle for one host-owned sensor endpoint, chosen by the
/// host at registration time. The driver never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointId(pub u16);

/// Receives decoded readings. Implementations decide what an endpoint
/// is — a log line, an MQTT topic, a Home Assistant entity.
pub trait PublishPort {
    /// Publish a numeric reading (temperature, percentage, hours,
    /// bank field, raw status word).
    fn publish_value(&mut self, endpoint: EndpointId, value: f32);

    /// Publish a boolean state derived from the status bitword.
    fn publish_state(&mut self, endpoint: EndpointId, on: bool);
}
