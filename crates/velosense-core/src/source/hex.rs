//! Radar notification captures stored as hex text.
//!
//! One notification per line, e.g. `00 d5 0a 07 ...`. Whitespace between
//! byte pairs is optional, blank lines and lines starting with `#` are
//! skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{NotificationSource, SourceError};

pub struct HexLineSource<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl HexLineSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> HexLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Line number of the most recently read line (1-based).
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> NotificationSource for HexLineSource<R> {
    fn next_notification(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let text = std::str::from_utf8(&self.buf)
                .map_err(|err| SourceError::InvalidHex {
                    line: self.line,
                    message: format!("not valid UTF-8 text ({err})"),
                })?
                .trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return decode_hex_line(text)
                .map(Some)
                .map_err(|message| SourceError::InvalidHex {
                    line: self.line,
                    message,
                });
        }
    }
}

fn decode_hex_line(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_value(pair[0])?;
            let lo = hex_value(pair[1])?;
            Ok((hi << 4) | lo)
        })
        .collect()
}

fn hex_value(c: char) -> Result<u8, String> {
    c.to_digit(16)
        .map(|value| value as u8)
        .ok_or_else(|| format!("'{c}' is not a hex digit"))
}
