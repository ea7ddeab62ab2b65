//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements  | Connects to                    |
//! |------------|-------------|--------------------------------|
//! | `uart`     | BusPort     | ESP32 UART (service connector) |
//! | `log_sink` | PublishPort | Serial log output              |
//! | `time`     | —           | ESP32 system timer / `Instant` |

pub mod log_sink;
pub mod time;
#[cfg(feature = "espidf")]
pub mod uart;
