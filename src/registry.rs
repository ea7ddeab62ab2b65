//! Sensor endpoint registration tables.
//!
//! The host binds protocol keys (entity ids, status bitmasks, bank
//! id + offset pairs) to opaque [`EndpointId`] handles once at setup;
//! during operation the decoder only reads the tables. Publishing goes
//! through the injected [`PublishPort`](crate::app::ports::PublishPort),
//! so the driver never owns a sensor object.
//!
//! All tables are fixed-capacity: the device's id space is small, and
//! a full table is a setup-time configuration mistake, not a runtime
//! condition.

use heapless::LinearMap;

use crate::app::ports::EndpointId;
use crate::error::RegistryError;

/// Key for one 8-bit field inside a configuration bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankKey {
    pub bank: u8,
    pub offset: u8,
}

const TEMP_CAP: usize = 16;
const VALVE_CAP: usize = 4;
const HOUR_CAP: usize = 4;
const BIT_CAP: usize = 8;
const BANK_CAP: usize = 24;

/// Registration tables, populated once before the driver starts
/// ticking. Keys are unique; re-registering a key replaces the
/// previous endpoint (last write wins).
#[derive(Default)]
pub struct SensorRegistry {
    temps: LinearMap<u8, EndpointId, TEMP_CAP>,
    valves: LinearMap<u8, EndpointId, VALVE_CAP>,
    hours: LinearMap<u8, EndpointId, HOUR_CAP>,
    status_bits: LinearMap<u8, EndpointId, BIT_CAP>,
    banks: LinearMap<BankKey, EndpointId, BANK_CAP>,
    status_word: Option<EndpointId>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────

    pub fn register_temperature(
        &mut self,
        id: u8,
        endpoint: EndpointId,
    ) -> Result<(), RegistryError> {
        self.temps
            .insert(id, endpoint)
            .map(|_| ())
            .map_err(|_| RegistryError::TableFull("temperature"))
    }

    pub fn register_valve(&mut self, id: u8, endpoint: EndpointId) -> Result<(), RegistryError> {
        self.valves
            .insert(id, endpoint)
            .map(|_| ())
            .map_err(|_| RegistryError::TableFull("valve"))
    }

    pub fn register_hour_counter(
        &mut self,
        id: u8,
        endpoint: EndpointId,
    ) -> Result<(), RegistryError> {
        self.hours
            .insert(id, endpoint)
            .map(|_| ())
            .map_err(|_| RegistryError::TableFull("hour counter"))
    }

    /// Bind a status-bitword mask to a boolean endpoint.
    pub fn register_status_bit(
        &mut self,
        mask: u8,
        endpoint: EndpointId,
    ) -> Result<(), RegistryError> {
        self.status_bits
            .insert(mask, endpoint)
            .map(|_| ())
            .map_err(|_| RegistryError::TableFull("status bit"))
    }

    /// Bind the raw status bitword to a numeric endpoint.
    pub fn register_status_word(&mut self, endpoint: EndpointId) {
        self.status_word = Some(endpoint);
    }

    pub fn register_bank_field(
        &mut self,
        bank: u8,
        offset: u8,
        endpoint: EndpointId,
    ) -> Result<(), RegistryError> {
        self.banks
            .insert(BankKey { bank, offset }, endpoint)
            .map(|_| ())
            .map_err(|_| RegistryError::TableFull("bank field"))
    }

    // ── Lookup (decode path) ──────────────────────────────────

    pub fn temperature(&self, id: u8) -> Option<EndpointId> {
        self.temps.get(&id).copied()
    }

    pub fn valve(&self, id: u8) -> Option<EndpointId> {
        self.valves.get(&id).copied()
    }

    pub fn hour_counter(&self, id: u8) -> Option<EndpointId> {
        self.hours.get(&id).copied()
    }

    pub fn status_word(&self) -> Option<EndpointId> {
        self.status_word
    }

    pub fn bank_field(&self, bank: u8, offset: u8) -> Option<EndpointId> {
        self.banks.get(&BankKey { bank, offset }).copied()
    }

    /// Registered (mask, endpoint) pairs of the status bitword.
    pub fn status_bit_entries(&self) -> impl Iterator<Item = (u8, EndpointId)> + '_ {
        self.status_bits.iter().map(|(mask, ep)| (*mask, *ep))
    }

    /// Whether a status-word read is worth scheduling at all.
    pub fn wants_status_word(&self) -> bool {
        self.status_word.is_some() || !self.status_bits.is_empty()
    }

    // ── Scheduler support ─────────────────────────────────────

    pub fn temperature_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.temps.keys().copied()
    }

    pub fn valve_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.valves.keys().copied()
    }

    pub fn hour_counter_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.hours.keys().copied()
    }

    /// Bank ids appearing in at least one bank-field registration.
    /// Duplicates are possible (many fields share a bank); the
    /// scheduler deduplicates since one read serves the whole bank.
    pub fn bank_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.banks.keys().map(|key| key.bank)
    }

    // ── Introspection ─────────────────────────────────────────

    pub fn temperature_count(&self) -> usize {
        self.temps.len()
    }

    pub fn valve_count(&self) -> usize {
        self.valves.len()
    }

    pub fn hour_counter_count(&self) -> usize {
        self.hours.len()
    }

    pub fn status_bit_count(&self) -> usize {
        self.status_bits.len()
    }

    pub fn bank_field_count(&self) -> usize {
        self.banks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent_last_write_wins() {
        let mut reg = SensorRegistry::new();
        reg.register_temperature(0x12, EndpointId(1)).unwrap();
        reg.register_temperature(0x12, EndpointId(2)).unwrap();
        assert_eq!(reg.temperature(0x12), Some(EndpointId(2)));
        assert_eq!(reg.temperature_count(), 1);
    }

    #[test]
    fn unregistered_lookups_are_none() {
        let reg = SensorRegistry::new();
        assert!(reg.temperature(0x12).is_none());
        assert!(reg.valve(0x31).is_none());
        assert!(reg.hour_counter(0x3A).is_none());
        assert!(reg.bank_field(0x0C, 0).is_none());
        assert!(reg.status_word().is_none());
        assert!(!reg.wants_status_word());
    }

    #[test]
    fn status_word_wanted_with_bits_only() {
        let mut reg = SensorRegistry::new();
        reg.register_status_bit(0x10, EndpointId(7)).unwrap();
        assert!(reg.wants_status_word());
    }

    #[test]
    fn full_table_reports_typed_error() {
        let mut reg = SensorRegistry::new();
        for id in 0..4u8 {
            reg.register_valve(id, EndpointId(id.into())).unwrap();
        }
        let err = reg.register_valve(9, EndpointId(9)).unwrap_err();
        assert_eq!(err, RegistryError::TableFull("valve"));
        // Existing keys still replace fine when the table is full.
        assert!(reg.register_valve(0, EndpointId(42)).is_ok());
    }

    #[test]
    fn bank_ids_enumerate_with_duplicates() {
        let mut reg = SensorRegistry::new();
        reg.register_bank_field(0x0B, 1, EndpointId(1)).unwrap();
        reg.register_bank_field(0x0B, 2, EndpointId(2)).unwrap();
        reg.register_bank_field(0x0C, 0, EndpointId(3)).unwrap();
        let ids: Vec<u8> = reg.bank_ids().collect();
        assert_eq!(ids.iter().filter(|b| **b == 0x0B).count(), 2);
        assert_eq!(ids.iter().filter(|b| **b == 0x0C).count(), 1);
    }
}
