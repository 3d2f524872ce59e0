//! Serial Measurement Log
//!
//! Writes one [`LogRecord`] line per measured cycle to the log UART.

use embedded_io_async::Write;

use crate::protocol::LogRecord;

/// Serial log writer error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerialLogError<E> {
    /// Record did not fit the line buffer
    Format,
    /// The UART rejected the write
    Io(E),
}

impl<E: defmt::Format> defmt::Format for SerialLogError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Format => defmt::write!(f, "record too long"),
            Self::Io(e) => defmt::write!(f, "io: {}", e),
        }
    }
}

/// Measurement log over any async byte sink
pub struct SerialLog<W> {
    port: W,
}

impl<W: Write> SerialLog<W> {
    /// Wrap a serial port
    #[must_use]
    pub const fn new(port: W) -> Self {
        Self { port }
    }

    /// Write one record line
    pub async fn emit(&mut self, record: &LogRecord) -> Result<(), SerialLogError<W::Error>> {
        let line = record.render().map_err(|_| SerialLogError::Format)?;
        self.port
            .write_all(line.as_bytes())
            .await
            .map_err(SerialLogError::Io)
    }
}
