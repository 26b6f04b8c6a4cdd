use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use super::{ByteSource, SourceError};

/// Buffered byte-at-a-time reader over any `Read`.
///
/// Works for recorded captures as well as serial device nodes whose line
/// settings were applied beforehand.
pub struct ReaderByteSource<R> {
    inner: BufReader<R>,
}

impl ReaderByteSource<File> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> ReaderByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
        }
    }
}

impl<R: Read> ByteSource for ReaderByteSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use super::ReaderByteSource;
    use crate::source::{ByteSource, SourceError};

    struct FailAfter {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"));
            }
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn yields_bytes_in_order_then_end() {
        let mut source = ReaderByteSource::new(Cursor::new(vec![1, 2, 3]));
        assert_eq!(source.next_byte().unwrap(), Some(1));
        assert_eq!(source.next_byte().unwrap(), Some(2));
        assert_eq!(source.next_byte().unwrap(), Some(3));
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn buffered_bytes_are_delivered_before_the_error() {
        let mut source = ReaderByteSource::new(FailAfter {
            data: vec![7, 8],
            pos: 0,
        });
        assert_eq!(source.next_byte().unwrap(), Some(7));
        assert_eq!(source.next_byte().unwrap(), Some(8));
        assert!(matches!(source.next_byte(), Err(SourceError::Io(_))));
    }
}
