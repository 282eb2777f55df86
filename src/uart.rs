//! UART wrapper functions and data structures
//!
//! A thin driver over an externally provided serial peripheral with a
//! printf-style interface: output is rendered into a fixed-size local
//! buffer first, then handed to the peripheral in a single write call.
//!
//! The buffer size is supplied by the build system and checked against
//! the expected literal at compile time (see [`crate::UART_BUFFER_SIZE`]).
//! Rendering is bounds checked: output that does not fit fails with
//! BufferOverflow instead of running off the end of the buffer.
#![warn(missing_docs)]

use crate::{
    error::{Error, ErrorKind},
    UART_BUFFER_SIZE,
};
use ufmt::uWrite;

/// The serial peripheral boundary.
///
/// The surrounding system provides the concrete peripheral; the fixture
/// only needs to start it at a baud rate and hand it rendered bytes.
pub trait SerialPort {
    /// Start the peripheral at the given baud rate
    fn begin(&mut self, baud_rate: u32) -> Result<(), Error>;

    /// Write the buffer to the peripheral
    fn write(&mut self, buffer: &[u8]) -> Result<(), Error>;
}

/// Adapter from an embedded-hal serial writer to [`SerialPort`].
///
/// Blocks on WouldBlock and maps peripheral failures to
/// [`ErrorKind::Serial`].
pub struct HalPort<W>(pub W);

impl<W> SerialPort for HalPort<W>
where
    W: embedded_hal::serial::Write<u8>,
{
    /// The baud rate of a HAL serial is fixed when the peripheral is
    /// constructed, so there is nothing left to start here.
    fn begin(&mut self, _baud_rate: u32) -> Result<(), Error> {
        Ok(())
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), Error> {
        for &byte in buffer {
            nb::block!(self.0.write(byte)).map_err(|_| Error::new(ErrorKind::Serial))?;
        }
        nb::block!(self.0.flush()).map_err(|_| Error::new(ErrorKind::Serial))
    }
}

/// A bounds-checked ufmt writer over a byte buffer.
///
/// Rendered output accumulates at the front of the buffer; output past
/// the end of the buffer fails with BufferOverflow and leaves the
/// buffer contents up to that point intact.
pub struct BufferWriter<'a> {
    buffer: &'a mut [u8],
    cursor: usize,
}

impl<'a> BufferWriter<'a> {
    /// Create a new BufferWriter over a buffer
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// The number of bytes rendered so far
    pub fn written(&self) -> usize {
        self.cursor
    }
}

impl<'a> uWrite for BufferWriter<'a> {
    type Error = Error;

    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        let bytes = s.as_bytes();

        let end = self
            .cursor
            .checked_add(bytes.len())
            .ok_or(Error::new(ErrorKind::BufferOverflow))?;
        if end > self.buffer.len() {
            return Err(Error::new(ErrorKind::BufferOverflow));
        }

        self.buffer[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;

        Ok(())
    }
}

/// A UART driver with a printf-style interface.
///
/// Owns the serial peripheral and the format buffer.  All formatted
/// output is rendered into the buffer before a single write call to the
/// peripheral.
pub struct Uart<P: SerialPort> {
    port: P,
    buffer: [u8; UART_BUFFER_SIZE],
}

impl<P: SerialPort> Uart<P> {
    /// Create a new Uart over a serial peripheral
    pub fn new(port: P) -> Self {
        Self {
            port,
            buffer: [0; UART_BUFFER_SIZE],
        }
    }

    /// Start the peripheral at the given baud rate
    pub fn init(&mut self, baud_rate: u32) -> Result<(), Error> {
        self.port.begin(baud_rate)
    }

    /// Render formatted output into the buffer, then write exactly the
    /// rendered bytes to the peripheral in one call.
    ///
    /// The render closure receives the buffer writer; use it with the
    /// ufmt macros.  If rendering fails nothing reaches the peripheral.
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::error::Error;
    /// use wio_pkg::uart::{SerialPort, Uart};
    ///
    /// struct NullPort;
    ///
    /// impl SerialPort for NullPort {
    ///     fn begin(&mut self, _baud_rate: u32) -> Result<(), Error> {
    ///         Ok(())
    ///     }
    ///
    ///     fn write(&mut self, _buffer: &[u8]) -> Result<(), Error> {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let mut uart = Uart::new(NullPort);
    /// uart.init(57600).unwrap();
    /// uart.printf(|w| ufmt::uwrite!(w, "value: {}", 42)).unwrap();
    /// ```
    pub fn printf<F>(&mut self, render: F) -> Result<(), Error>
    where
        F: FnOnce(&mut BufferWriter<'_>) -> Result<(), Error>,
    {
        let mut writer = BufferWriter::new(&mut self.buffer);
        render(&mut writer)?;
        let rendered = writer.written();

        self.port.write(&self.buffer[..rendered])
    }

    /// Give the peripheral back, consuming the driver
    pub fn release(self) -> P {
        self.port
    }
}
