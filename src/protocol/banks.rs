//! Configuration-bank field layouts.
//!
//! A bank response groups many 8-bit settings into one frame; which
//! byte means what is fixed per bank id. The layouts are static tables
//! (offset, signedness, minimum total frame length) so that adding a
//! bank never touches decode control flow. Offsets are relative to the
//! payload start (frame byte 5).
//!
//! The per-field length gates reproduce the device exactly: shorter
//! frames have been observed in the field, and a field whose gate the
//! frame does not meet is skipped for that round, not treated as an
//! error.

/// How to interpret one 8-bit bank field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSign {
    /// Two's-complement `i8` (temperatures, differentials).
    Signed,
    /// Plain `u8` (lock times).
    Unsigned,
}

/// One decodable field within a bank payload.
#[derive(Debug, Clone, Copy)]
pub struct BankField {
    /// Offset within the payload (frame byte `5 + offset`).
    pub offset: u8,
    pub sign: FieldSign,
    /// Minimum total frame length required for this field to be
    /// present (`offset + 6` covers header, payload up to the field,
    /// and checksum).
    pub min_frame_len: usize,
}

const fn signed(offset: u8) -> BankField {
    BankField {
        offset,
        sign: FieldSign::Signed,
        min_frame_len: offset as usize + 6,
    }
}

const fn unsigned(offset: u8) -> BankField {
    BankField {
        offset,
        sign: FieldSign::Unsigned,
        min_frame_len: offset as usize + 6,
    }
}

/// The complete field layout of one bank.
#[derive(Debug, Clone, Copy)]
pub struct BankLayout {
    pub id: u8,
    pub fields: &'static [BankField],
}

/// Bank 0x0C — heating-circuit curve and limits. The six curve fields
/// are always present; the tail fields only appear in longer frames.
static BANK_0C: &[BankField] = &[
    signed(0),  // curve point at -20 °C
    signed(1),  // curve point at 0 °C
    signed(2),  // curve point at +20 °C
    signed(3),  // minimum supply limit
    signed(4),  // maximum supply limit
    signed(5),  // night setback effect
    signed(14), // autumn drying
    signed(19), // outside-temperature delay (minutes)
    signed(23), // pre-increase
];

/// Bank 0x2C — circuit L1 settings.
static BANK_2C: &[BankField] = &[
    signed(8), // summer close temperature
];

/// Bank 0x0B — heat-pump settings. Offset 13 (DHW lock time) is the
/// lone unsigned field.
static BANK_0B: &[BankField] = &[
    signed(1),    // tank top, winter
    signed(2),    // tank top, summer
    signed(3),    // tank bottom differential
    signed(4),    // tank top differential
    signed(5),    // tank bottom minimum
    signed(6),    // electric-heater delay (minutes)
    signed(7),    // tank top electric-heater differential
    signed(8),    // extra heating
    signed(9),    // extra heating time (minutes)
    signed(10),   // control mode
    signed(11),   // brine alert
    signed(12),   // DHW pre-open
    unsigned(13), // DHW lock time (minutes)
    signed(14),   // compressor lock time (minutes)
];

static BANK_LAYOUTS: &[BankLayout] = &[
    BankLayout {
        id: 0x0C,
        fields: BANK_0C,
    },
    BankLayout {
        id: 0x2C,
        fields: BANK_2C,
    },
    BankLayout {
        id: 0x0B,
        fields: BANK_0B,
    },
];

/// Field layout for a bank id, or `None` for an unknown bank.
pub fn layout_for(bank_id: u8) -> Option<&'static BankLayout> {
    BANK_LAYOUTS.iter().find(|layout| layout.id == bank_id)
}
