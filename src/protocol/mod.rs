//! Geopro 202S wire protocol.
//!
//! Inbound frame layout (numbers are byte offsets):
//!
//! ```text
//! ┌──────┬──────┬──────┬──────────┬──────┬────────────────┬──────────┐
//! │ 0x02 │ TYPE │ LEN  │ 0x00     │ ID   │ payload        │ CHECKSUM │
//! │ START│ [1]  │ [2]  │ RESERVED │ [4]  │ LEN-2 bytes    │ [last]   │
//! └──────┴──────┴──────┴──────────┴──────┴────────────────┴──────────┘
//! ```
//!
//! `LEN` counts reserved + id + payload, so a complete frame is
//! `LEN + 4` bytes. The checksum is the byte-sum mod 256 over bytes
//! 1 through the second-to-last. There is no end marker — frames are
//! delimited by the declared length and an inter-byte timeout.

pub mod banks;
pub mod decode;
pub mod frame;
pub mod ids;

/// Frame start marker. Also the only framing signal: a `0x02` payload
/// byte restarts reassembly (an ambiguity of the device protocol, left
/// unescaped on purpose).
pub const MSG_START: u8 = 0x02;

/// Outbound read command.
pub const CMD_READ: u8 = 0x81;
/// Declared length of a read request (reserved + id).
pub const CMD_LEN: u8 = 0x02;

/// Response carrying a valve position (1-byte unsigned percentage).
pub const TYPE_VALVE: u8 = 0x03;
/// Response carrying a 16-bit big-endian reading: a temperature, an
/// hour counter, or the status bitword, distinguished by entity id.
pub const TYPE_TEMP: u8 = 0x04;
/// Response carrying a configuration bank (grouped 8-bit settings).
pub const TYPE_BANK: u8 = 0x21;

/// Receive buffer capacity. The largest observed device frame is the
/// 37-byte bank response; any declared length that cannot fit abandons
/// the frame.
pub const MAX_FRAME_LEN: usize = 64;

/// Byte offset of the message-type byte.
pub const OFFSET_TYPE: usize = 1;
/// Byte offset of the declared-length byte.
pub const OFFSET_LEN: usize = 2;
/// Byte offset of the entity id (or bank id).
pub const OFFSET_ID: usize = 4;
/// Byte offset where the payload begins.
pub const OFFSET_PAYLOAD: usize = 5;
