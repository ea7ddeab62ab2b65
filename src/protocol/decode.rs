//! Frame validation and payload dispatch.
//!
//! Takes a reassembled raw frame, verifies its checksum, and routes the
//! payload by message type to the matching registered endpoints.
//! Dispatch is pure with respect to the registry — decoding the same
//! frame twice publishes the same values twice — and values for
//! unregistered ids are computed and discarded without complaint.

use log::{debug, warn};

use super::banks::{self, FieldSign};
use super::frame::checksum;
use super::ids::STATUS_WORD_ID;
use super::{OFFSET_ID, OFFSET_PAYLOAD, OFFSET_TYPE, TYPE_BANK, TYPE_TEMP, TYPE_VALVE};
use crate::app::ports::PublishPort;
use crate::diagnostics::LinkStats;
use crate::registry::SensorRegistry;

/// Shortest frame the wire format admits (declared length 2: header
/// plus checksum, no payload).
const MIN_FRAME: usize = 6;
/// Minimum bytes for a 16-bit reading frame (header + 2 payload + crc).
const MIN_TEMP_FRAME: usize = 8;
/// Minimum bytes for a valve frame (header + 1 payload + crc).
const MIN_VALVE_FRAME: usize = 7;
/// Minimum bytes for a bank frame. Anything shorter is malformed; the
/// per-field gates handle legitimate variation above this floor.
const MIN_BANK_FRAME: usize = 32;

/// Validate and dispatch one complete raw frame.
pub fn dispatch(
    raw: &[u8],
    registry: &SensorRegistry,
    sink: &mut impl PublishPort,
    stats: &mut LinkStats,
) {
    if raw.len() < MIN_FRAME {
        // A declared length below 2 yields a frame with no id byte.
        stats.short_frames += 1;
        return;
    }
    let Some((last, body)) = raw.split_last() else {
        return;
    };
    // Checksum covers everything between start marker and crc byte.
    let computed = checksum(&body[1..]);
    if computed != *last {
        warn!(
            "checksum mismatch (calculated 0x{:02X}, received 0x{:02X})",
            computed, last
        );
        stats.checksum_failures += 1;
        return;
    }

    let msg_type = raw[OFFSET_TYPE];
    let id = raw[OFFSET_ID];
    debug!(
        "frame: type=0x{:02X} id=0x{:02X} len={}",
        msg_type,
        id,
        raw.len()
    );

    match msg_type {
        TYPE_TEMP if raw.len() >= MIN_TEMP_FRAME => {
            stats.frames_decoded += 1;
            decode_reading(id, raw, registry, sink);
        }
        TYPE_VALVE if raw.len() >= MIN_VALVE_FRAME => {
            stats.frames_decoded += 1;
            decode_valve(id, raw, registry, sink);
        }
        TYPE_BANK => {
            if raw.len() < MIN_BANK_FRAME {
                warn!(
                    "bank frame too short: {} bytes (expected at least {})",
                    raw.len(),
                    MIN_BANK_FRAME
                );
                stats.short_frames += 1;
                return;
            }
            stats.frames_decoded += 1;
            decode_bank(id, raw, registry, sink);
        }
        TYPE_TEMP | TYPE_VALVE => {
            warn!("frame too short for type 0x{:02X}: {} bytes", msg_type, raw.len());
            stats.short_frames += 1;
        }
        other => {
            debug!("unknown message type 0x{:02X}", other);
            stats.unknown_types += 1;
        }
    }
}

/// 16-bit big-endian reading: temperature, hour counter, or the status
/// bitword, distinguished only by entity id.
fn decode_reading(
    id: u8,
    raw: &[u8],
    registry: &SensorRegistry,
    sink: &mut impl PublishPort,
) {
    let word = u16::from_be_bytes([raw[OFFSET_PAYLOAD], raw[OFFSET_PAYLOAD + 1]]);

    if let Some(endpoint) = registry.temperature(id) {
        let celsius = f32::from(word as i16) / 100.0;
        debug!("temperature 0x{:02X}: {:.2} °C (raw {})", id, celsius, word as i16);
        sink.publish_value(endpoint, celsius);
        return;
    }

    if let Some(endpoint) = registry.hour_counter(id) {
        debug!("hour counter 0x{:02X}: {} h", id, word);
        sink.publish_value(endpoint, f32::from(word));
        return;
    }

    if id == STATUS_WORD_ID {
        debug!("status word: 0x{:04X}", word);
        if let Some(endpoint) = registry.status_word() {
            sink.publish_value(endpoint, f32::from(word));
        }
        for (mask, endpoint) in registry.status_bit_entries() {
            sink.publish_state(endpoint, word & u16::from(mask) != 0);
        }
    }
}

fn decode_valve(id: u8, raw: &[u8], registry: &SensorRegistry, sink: &mut impl PublishPort) {
    let Some(endpoint) = registry.valve(id) else {
        return;
    };
    let position = raw[OFFSET_PAYLOAD];
    debug!("valve 0x{:02X}: {} %", id, position);
    sink.publish_value(endpoint, f32::from(position));
}

/// Decode every table field the frame is long enough to carry, and
/// publish those with a registered endpoint.
fn decode_bank(bank_id: u8, raw: &[u8], registry: &SensorRegistry, sink: &mut impl PublishPort) {
    let Some(layout) = banks::layout_for(bank_id) else {
        debug!("unknown bank 0x{:02X}", bank_id);
        return;
    };

    for field in layout.fields {
        if raw.len() < field.min_frame_len {
            // Shorter frame than this field requires: skip, not an
            // error — the field simply isn't reported this round.
            continue;
        }
        let byte = raw[OFFSET_PAYLOAD + usize::from(field.offset)];
        let value = match field.sign {
            FieldSign::Signed => f32::from(byte as i8),
            FieldSign::Unsigned => f32::from(byte),
        };
        if let Some(endpoint) = registry.bank_field(bank_id, field.offset) {
            debug!(
                "bank 0x{:02X} offset {}: {}",
                bank_id, field.offset, value
            );
            sink.publish_value(endpoint, value);
        }
    }
}
