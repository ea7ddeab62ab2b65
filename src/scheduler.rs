//! Poll scheduling and request pacing.
//!
//! Four reading classes, each with its own rearm timer: temperatures,
//! valves, status (hour counters plus the status word), and banks.
//! When a class comes due its entity ids are pushed onto a bounded
//! request queue; the pacing step hands out at most one id per call,
//! never closer together than the configured inter-request delay.

use heapless::Deque;
use log::{debug, warn};

use crate::config::DriverConfig;
use crate::diagnostics::LinkStats;
use crate::protocol::ids::STATUS_WORD_ID;
use crate::registry::SensorRegistry;

/// Upper bound on queued requests. A full catalog enqueues well under
/// half of this; overflow means the bus has stalled for several cycles.
const REQUEST_QUEUE_LEN: usize = 64;

pub struct PollScheduler {
    min_read_interval_ms: u32,
    bank_read_interval_ms: u32,
    request_delay_ms: u32,
    last_temperature_ms: u32,
    last_valve_ms: u32,
    last_status_ms: u32,
    /// 0 means "never polled", which makes the bank class due on the
    /// very first tick so configuration values appear without the
    /// 60-second wait.
    last_bank_ms: u32,
    last_tx_ms: u32,
    sent_any: bool,
    queue: Deque<u8, REQUEST_QUEUE_LEN>,
}

impl PollScheduler {
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            min_read_interval_ms: config.min_read_interval_ms,
            bank_read_interval_ms: config.bank_read_interval_ms,
            request_delay_ms: config.request_delay_ms,
            last_temperature_ms: 0,
            last_valve_ms: 0,
            last_status_ms: 0,
            last_bank_ms: 0,
            last_tx_ms: 0,
            sent_any: false,
            queue: Deque::new(),
        }
    }

    /// Evaluate class due-ness and enqueue requests for everything
    /// whose interval has elapsed.
    pub fn tick(&mut self, now_ms: u32, registry: &SensorRegistry, stats: &mut LinkStats) {
        if elapsed(now_ms, self.last_temperature_ms) > self.min_read_interval_ms {
            self.last_temperature_ms = now_ms;
            for id in registry.temperature_ids() {
                self.enqueue(id, stats);
            }
        }

        if elapsed(now_ms, self.last_valve_ms) > self.min_read_interval_ms {
            self.last_valve_ms = now_ms;
            for id in registry.valve_ids() {
                self.enqueue(id, stats);
            }
        }

        if elapsed(now_ms, self.last_status_ms) > self.min_read_interval_ms {
            self.last_status_ms = now_ms;
            for id in registry.hour_counter_ids() {
                self.enqueue(id, stats);
            }
            if registry.wants_status_word() {
                self.enqueue(STATUS_WORD_ID, stats);
            }
        }

        if self.last_bank_ms == 0 || elapsed(now_ms, self.last_bank_ms) > self.bank_read_interval_ms
        {
            self.last_bank_ms = now_ms.max(1);
            self.enqueue_banks(registry, stats);
        }
    }

    /// One request per distinct bank: a single bank read serves every
    /// offset sensor registered within it.
    fn enqueue_banks(&mut self, registry: &SensorRegistry, stats: &mut LinkStats) {
        let mut seen: Deque<u8, REQUEST_QUEUE_LEN> = Deque::new();
        for bank in registry.bank_ids() {
            if seen.iter().any(|b| *b == bank) {
                continue;
            }
            let _ = seen.push_back(bank);
            self.enqueue(bank, stats);
        }
    }

    fn enqueue(&mut self, id: u8, stats: &mut LinkStats) {
        if self.queue.push_back(id).is_err() {
            warn!("request queue full, dropping poll for 0x{:02X}", id);
            stats.queue_drops += 1;
        }
    }

    /// Pacing step: hand out the next queued id if the inter-request
    /// delay has elapsed since the last one.
    pub fn next_request(&mut self, now_ms: u32) -> Option<u8> {
        if self.queue.is_empty() {
            return None;
        }
        if self.sent_any && elapsed(now_ms, self.last_tx_ms) < self.request_delay_ms {
            return None;
        }
        let id = self.queue.pop_front()?;
        self.last_tx_ms = now_ms;
        self.sent_any = true;
        debug!("dispatching poll for 0x{:02X} ({} queued)", id, self.queue.len());
        Some(id)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Millisecond delta that stays correct across u32 clock rollover.
fn elapsed(now_ms: u32, then_ms: u32) -> u32 {
    now_ms.wrapping_sub(then_ms)
}
