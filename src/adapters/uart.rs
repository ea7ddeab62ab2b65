//! ESP32 UART adapter for the device bus.
//!
//! Wraps an [`esp_idf_hal::uart::UartDriver`] behind [`BusPort`].
//! Reads are non-blocking (zero-tick timeout) and chunked into a small
//! local buffer so the driver core can keep its byte-at-a-time view.

use esp_idf_hal::uart::UartDriver;
use log::warn;

use crate::app::ports::BusPort;
use crate::error::BusError;

const READ_CHUNK: usize = 64;

pub struct UartBus<'d> {
    uart: UartDriver<'d>,
    buf: [u8; READ_CHUNK],
    len: usize,
    pos: usize,
}

impl<'d> UartBus<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self {
            uart,
            buf: [0; READ_CHUNK],
            len: 0,
            pos: 0,
        }
    }
}

impl BusPort for UartBus<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            // Zero-tick timeout: returns whatever the UART FIFO holds.
            match self.uart.read(&mut self.buf, 0) {
                Ok(0) | Err(_) => return None,
                Ok(n) => {
                    self.len = n;
                    self.pos = 0;
                }
            }
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Some(byte)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), BusError> {
        match self.uart.write(frame) {
            Ok(n) if n == frame.len() => Ok(()),
            Ok(n) => {
                warn!("short UART write: {} of {} bytes", n, frame.len());
                Err(BusError::WriteFailed)
            }
            Err(e) => {
                warn!("UART write failed: {e}");
                Err(BusError::WriteFailed)
            }
        }
    }
}
