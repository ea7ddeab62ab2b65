//! Geopro 202S heat-pump serial bus driver.
//!
//! Polls a Geopro 202S ground-source heat-pump controller over its
//! service connector: length-prefixed, checksummed frames with no end
//! marker, delimited by inter-byte silence. The driver periodically
//! requests temperature, valve, hour-counter, status and configuration
//! bank readings and publishes the decoded values through a host-owned
//! sink.
//!
//! ```text
//!   serial bus ─▶ FrameAssembler ─▶ dispatch ─▶ PublishPort
//!                        ▲                          │
//!                  PollScheduler ◀── SensorRegistry ┘
//! ```
//!
//! All ESP-IDF-specific code is guarded by `#[cfg(feature = "espidf")]`
//! so the protocol core builds and tests on the host.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod protocol;
pub mod registry;
pub mod scheduler;

pub mod error;

pub mod adapters;
