use std::io::Write;

use super::{Sink, SinkError, SinkMessage};
use crate::Measurement;

/// Writes a CSV header and one row per measurement.
///
/// Messages do not belong in the table; they go to the `log` facade.
pub struct CsvSink<W: Write> {
    out: W,
    closed: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, closed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        let line = cells
            .iter()
            .map(|cell| escape_field(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}

impl<W: Write> Sink for CsvSink<W> {
    fn write_header(&mut self, fields: &[&str]) -> Result<(), SinkError> {
        self.write_row(fields)
    }

    fn write_measurement(&mut self, measurement: &Measurement) -> Result<(), SinkError> {
        self.write_row(&measurement.fields())
    }

    fn send_msg(&mut self, msg: &SinkMessage) -> Result<(), SinkError> {
        let level: log::Level = msg.level.into();
        log::log!(level, "{}", msg.msg);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), SinkError> {
        if !self.closed {
            self.out.flush()?;
            self.closed = true;
        }
        Ok(())
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
