//! The driver core: owns the protocol state machines and runs the
//! per-tick control flow.
//!
//! One tick = drain-and-decode every buffered inbound byte, evaluate
//! poll scheduling, then transmit at most one paced request. The host
//! calls [`GeoproDriver::tick`] from its main loop with a millisecond
//! uptime clock; everything else is injected through the port traits.

use log::{info, warn};

use crate::app::ports::{BusPort, EndpointId, PublishPort};
use crate::config::DriverConfig;
use crate::diagnostics::LinkStats;
use crate::error::Result;
use crate::protocol::decode;
use crate::protocol::frame::{encode_read_request, FrameAssembler};
use crate::registry::SensorRegistry;
use crate::scheduler::PollScheduler;

pub struct GeoproDriver {
    assembler: FrameAssembler,
    registry: SensorRegistry,
    scheduler: PollScheduler,
    stats: LinkStats,
}

impl GeoproDriver {
    pub fn new(config: DriverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            assembler: FrameAssembler::new(config.byte_timeout_ms),
            registry: SensorRegistry::new(),
            scheduler: PollScheduler::new(&config),
            stats: LinkStats::new(),
        })
    }

    // ───────────────────────────────────────────────────────────
    // Registration (done once at startup, before the tick loop)
    // ───────────────────────────────────────────────────────────

    pub fn register_temperature(&mut self, id: u8, endpoint: EndpointId) -> Result<()> {
        self.registry.register_temperature(id, endpoint)?;
        Ok(())
    }

    pub fn register_valve(&mut self, id: u8, endpoint: EndpointId) -> Result<()> {
        self.registry.register_valve(id, endpoint)?;
        Ok(())
    }

    pub fn register_hour_counter(&mut self, id: u8, endpoint: EndpointId) -> Result<()> {
        self.registry.register_hour_counter(id, endpoint)?;
        Ok(())
    }

    pub fn register_status_word(&mut self, endpoint: EndpointId) {
        self.registry.register_status_word(endpoint);
    }

    pub fn register_status_bit(&mut self, mask: u8, endpoint: EndpointId) -> Result<()> {
        self.registry.register_status_bit(mask, endpoint)?;
        Ok(())
    }

    pub fn register_bank_field(&mut self, bank: u8, offset: u8, endpoint: EndpointId) -> Result<()> {
        self.registry.register_bank_field(bank, offset, endpoint)?;
        Ok(())
    }

    // ───────────────────────────────────────────────────────────
    // Tick loop
    // ───────────────────────────────────────────────────────────

    /// Run one driver cycle. Never blocks: reads only what the bus has
    /// buffered and writes at most one request.
    pub fn tick(&mut self, bus: &mut impl BusPort, sink: &mut impl PublishPort, now_ms: u32) {
        // Eager drain: decode everything the transport has buffered
        // before deciding what to ask for next.
        while let Some(byte) = bus.read_byte() {
            if let Some(frame) = self.assembler.feed(byte, now_ms, &mut self.stats) {
                decode::dispatch(frame, &self.registry, sink, &mut self.stats);
            }
        }

        self.scheduler.tick(now_ms, &self.registry, &mut self.stats);

        if let Some(id) = self.scheduler.next_request(now_ms) {
            let frame = encode_read_request(id);
            match bus.write_frame(&frame) {
                Ok(()) => self.stats.requests_sent += 1,
                Err(e) => warn!("request for 0x{:02X} not sent: {}", id, e),
            }
        }
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Log the driver's configuration summary, ESPHome `dump_config`
    /// style. Call once after registration.
    pub fn log_summary(&self) {
        info!("Geopro 202S driver:");
        info!("  temperature sensors: {}", self.registry.temperature_count());
        info!("  valve sensors: {}", self.registry.valve_count());
        info!("  hour counters: {}", self.registry.hour_counter_count());
        info!("  status bits: {}", self.registry.status_bit_count());
        info!("  bank fields: {}", self.registry.bank_field_count());
    }
}
