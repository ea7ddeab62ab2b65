//! Log-based publish adapter.
//!
//! Implements [`PublishPort`] by writing every decoded reading to the
//! logger (UART / USB-CDC in production). Useful for bring-up and as
//! the fallback when no richer integration is wired in; an MQTT or
//! Home Assistant adapter would implement the same trait.

use log::info;

use crate::app::ports::{EndpointId, PublishPort};

/// Adapter that logs every decoded reading to the serial console.
pub struct LogPublisher;

impl LogPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl PublishPort for LogPublisher {
    fn publish_value(&mut self, endpoint: EndpointId, value: f32) {
        info!("VALUE | endpoint={} | {:.2}", endpoint.0, value);
    }

    fn publish_state(&mut self, endpoint: EndpointId, on: bool) {
        info!("STATE | endpoint={} | {}", endpoint.0, if on { "ON" } else { "OFF" });
    }
}
