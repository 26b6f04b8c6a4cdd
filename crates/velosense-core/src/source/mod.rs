//! Byte sources feeding the decoders.
//!
//! Transports (BLE notifications, serial ports) sit behind two small traits.
//! Returning `Ok(None)` means the stream ended; an `Err` is a transport
//! failure, after which sessions stop cleanly.

mod hex;
mod reader;

pub use hex::HexLineSource;
pub use reader::ReaderByteSource;

use thiserror::Error;

/// Yields one radar notification payload per call.
pub trait NotificationSource {
    fn next_notification(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

/// Yields the serial stream one byte at a time, in arrival order.
pub trait ByteSource {
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex on line {line}: {message}")]
    InvalidHex { line: usize, message: String },
}

impl<S: NotificationSource + ?Sized> NotificationSource for &mut S {
    fn next_notification(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        (**self).next_notification()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        (**self).next_byte()
    }
}
