//! Known entity ids of the Geopro 202S controller.
//!
//! Mapped from observed bus traffic; the id space is sparse and the
//! unnamed ids are unknown, not reserved. Hosts are free to register
//! ids outside this catalog — the driver treats ids as opaque.

/// Entity id of the status bitword (read with [`TYPE_TEMP`] framing).
///
/// [`TYPE_TEMP`]: super::TYPE_TEMP
pub const STATUS_WORD_ID: u8 = 0x2D;

// --- Temperature entities (raw i16 / 100 = °C) ---

pub const TEMP_OUTSIDE: u8 = 0x12;
pub const TEMP_L1_SUPPLY: u8 = 0x14;
pub const TEMP_L1_ROOM: u8 = 0x15;
pub const TEMP_TANK_MIDDLE: u8 = 0x17;
pub const TEMP_TANK_TOP_INLET: u8 = 0x18;
pub const TEMP_BRINE: u8 = 0x19;
pub const TEMP_FREE_MEASUREMENT: u8 = 0x1B;
pub const TEMP_TANK_TOP: u8 = 0x21;
pub const TEMP_TANK_BOTTOM: u8 = 0x22;

// --- Valve position entities (u8 percent) ---

pub const VALVE_L1: u8 = 0x31;
pub const VALVE_DHW: u8 = 0x33;

// --- Run-hour counters (u16 hours) ---

pub const HOURS_EL_HEATER: u8 = 0x3A;
pub const HOURS_COMPRESSOR: u8 = 0x3B;

// --- Status bitword masks ---

pub const BIT_DIGI1: u8 = 0x01;
pub const BIT_DIGI2: u8 = 0x02;
pub const BIT_DIGI3: u8 = 0x04;
pub const BIT_EL_HEATER: u8 = 0x08;
pub const BIT_COMPRESSOR: u8 = 0x10;

// --- Configuration banks ---

/// Heat-pump settings.
pub const BANK_HEAT_PUMP: u8 = 0x0B;
/// Heating-circuit curve and limits.
pub const BANK_HEATING_CIRCUIT: u8 = 0x0C;
/// Circuit L1 settings.
pub const BANK_L1: u8 = 0x2C;

/// The full temperature catalog with display names, for hosts that
/// register everything the device is known to report.
pub const TEMPERATURE_CATALOG: &[(u8, &str)] = &[
    (TEMP_OUTSIDE, "outside temperature"),
    (TEMP_L1_SUPPLY, "L1 supply"),
    (TEMP_L1_ROOM, "L1 room"),
    (TEMP_TANK_MIDDLE, "tank middle"),
    (TEMP_TANK_TOP_INLET, "tank top inlet"),
    (TEMP_BRINE, "brine"),
    (TEMP_FREE_MEASUREMENT, "free measurement"),
    (TEMP_TANK_TOP, "tank top"),
    (TEMP_TANK_BOTTOM, "tank bottom"),
];

pub const VALVE_CATALOG: &[(u8, &str)] = &[
    (VALVE_L1, "L1 valve"),
    (VALVE_DHW, "DHW valve"),
];

pub const HOUR_CATALOG: &[(u8, &str)] = &[
    (HOURS_EL_HEATER, "electric heater hours"),
    (HOURS_COMPRESSOR, "compressor hours"),
];

pub const STATUS_BIT_CATALOG: &[(u8, &str)] = &[
    (BIT_COMPRESSOR, "compressor running"),
    (BIT_EL_HEATER, "electric heater running"),
    (BIT_DIGI1, "digi1"),
    (BIT_DIGI2, "digi2"),
    (BIT_DIGI3, "digi3"),
];
