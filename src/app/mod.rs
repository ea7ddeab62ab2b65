//! Driver core: port traits and the tick-driven service.

pub mod ports;
pub mod service;
