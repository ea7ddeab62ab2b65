//! Property tests for the wire-format layer.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use geopro202s::app::ports::{EndpointId, PublishPort};
use geopro202s::diagnostics::LinkStats;
use geopro202s::protocol::decode;
use geopro202s::protocol::frame::{checksum, encode_read_request, FrameAssembler};
use geopro202s::protocol::{MAX_FRAME_LEN, TYPE_TEMP};
use geopro202s::registry::SensorRegistry;
use proptest::prelude::*;

#[derive(Default)]
struct RecordingSink {
    values: Vec<(EndpointId, f32)>,
}

impl PublishPort for RecordingSink {
    fn publish_value(&mut self, endpoint: EndpointId, value: f32) {
        self.values.push((endpoint, value));
    }

    fn publish_state(&mut self, _endpoint: EndpointId, _on: bool) {}
}

/// Build a complete frame for a 16-bit reading.
fn reading_frame(id: u8, word: u16) -> Vec<u8> {
    let [hi, lo] = word.to_be_bytes();
    let mut frame = vec![0x02, TYPE_TEMP, 0x04, 0x00, id, hi, lo];
    let crc = checksum(&frame[1..]);
    frame.push(crc);
    frame
}

// ── Checksum ──────────────────────────────────────────────────

proptest! {
    /// The additive checksum detects every single-bit corruption: a
    /// one-bit flip changes exactly one term of the sum by ±2^k, which
    /// can never cancel modulo 256.
    #[test]
    fn checksum_detects_single_bit_flips(
        bytes in proptest::collection::vec(any::<u8>(), 1..=60),
        idx in any::<proptest::sample::Index>(),
        bit in 0u8..8,
    ) {
        let original = checksum(&bytes);
        let mut flipped = bytes.clone();
        let i = idx.index(flipped.len());
        flipped[i] ^= 1 << bit;
        prop_assert_ne!(checksum(&flipped), original);
    }

    /// Outbound read requests are themselves checksum-valid frames.
    #[test]
    fn read_requests_are_self_consistent(id in any::<u8>()) {
        let frame = encode_read_request(id);
        prop_assert_eq!(frame[5], checksum(&frame[1..5]));
    }
}

// ── Round trip ────────────────────────────────────────────────

proptest! {
    /// Any 16-bit reading survives encode → byte-at-a-time reassembly
    /// → decode exactly, including negative temperatures.
    #[test]
    fn reading_round_trips(id in 0u8..=0x2Cu8, raw in any::<i16>()) {
        let mut registry = SensorRegistry::new();
        registry.register_temperature(id, EndpointId(1)).unwrap();
        let mut sink = RecordingSink::default();
        let mut stats = LinkStats::new();
        let mut assembler = FrameAssembler::new(100);

        let frame = reading_frame(id, raw as u16);
        let mut decoded = 0u32;
        for (t, byte) in frame.iter().enumerate() {
            if let Some(complete) = assembler.feed(*byte, t as u32, &mut stats) {
                decode::dispatch(complete, &registry, &mut sink, &mut stats);
                decoded += 1;
            }
        }

        prop_assert_eq!(decoded, 1);
        prop_assert_eq!(sink.values.len(), 1);
        prop_assert_eq!(sink.values[0].1, f32::from(raw) / 100.0);
    }

    /// Reassembly is invariant to how the byte stream is chunked in
    /// time, as long as every gap stays inside the inter-byte timeout.
    #[test]
    fn reassembly_is_chunking_invariant(
        word in any::<u16>(),
        gaps in proptest::collection::vec(0u32..=99, 8),
    ) {
        let frame = reading_frame(0x12, word);
        let mut registry = SensorRegistry::new();
        registry.register_temperature(0x12, EndpointId(1)).unwrap();

        let mut sink = RecordingSink::default();
        let mut stats = LinkStats::new();
        let mut assembler = FrameAssembler::new(100);

        let mut now = 0u32;
        let mut decoded = 0u32;
        for (byte, gap) in frame.iter().zip(&gaps) {
            now += gap;
            if let Some(complete) = assembler.feed(*byte, now, &mut stats) {
                decode::dispatch(complete, &registry, &mut sink, &mut stats);
                decoded += 1;
            }
        }

        prop_assert_eq!(decoded, 1);
        prop_assert_eq!(stats.timeout_abandons, 0);
    }
}

// ── Robustness ────────────────────────────────────────────────

proptest! {
    /// Arbitrary garbage never panics the assembler and never yields a
    /// frame longer than the fixed buffer.
    #[test]
    fn arbitrary_streams_are_safe(
        bytes in proptest::collection::vec(any::<u8>(), 0..=512),
    ) {
        let mut assembler = FrameAssembler::new(100);
        let mut stats = LinkStats::new();
        for (t, byte) in bytes.iter().enumerate() {
            if let Some(frame) = assembler.feed(*byte, t as u32, &mut stats) {
                prop_assert!(frame.len() <= MAX_FRAME_LEN);
                prop_assert_eq!(frame[0], 0x02);
            }
        }
    }
}
