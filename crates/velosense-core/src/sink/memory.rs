use super::{Sink, SinkError, SinkMessage};
use crate::Measurement;

/// Keeps everything it receives; handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub header: Option<Vec<String>>,
    pub measurements: Vec<Measurement>,
    pub messages: Vec<SinkMessage>,
    pub shut_down: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), SinkError> {
        if self.shut_down {
            return Err(SinkError::Closed);
        }
        Ok(())
    }
}

impl Sink for MemorySink {
    fn write_header(&mut self, fields: &[&str]) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.header = Some(fields.iter().map(|field| field.to_string()).collect());
        Ok(())
    }

    fn write_measurement(&mut self, measurement: &Measurement) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.measurements.push(measurement.clone());
        Ok(())
    }

    fn send_msg(&mut self, msg: &SinkMessage) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.messages.push(msg.clone());
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), SinkError> {
        self.shut_down = true;
        Ok(())
    }
}
