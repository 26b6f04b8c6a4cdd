use std::io::Write;

use serde::Serialize;

use super::{Sink, SinkError, SinkMessage};
use crate::Measurement;

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Line<'a> {
    Header { fields: &'a [&'a str] },
    Measurement(&'a Measurement),
    Message(&'a SinkMessage),
}

/// Writes header, measurements and messages as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
    closed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, closed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &Line<'_>) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn write_header(&mut self, fields: &[&str]) -> Result<(), SinkError> {
        self.write_line(&Line::Header { fields })
    }

    fn write_measurement(&mut self, measurement: &Measurement) -> Result<(), SinkError> {
        self.write_line(&Line::Measurement(measurement))
    }

    fn send_msg(&mut self, msg: &SinkMessage) -> Result<(), SinkError> {
        self.write_line(&Line::Message(msg))
    }

    fn shutdown(&mut self) -> Result<(), SinkError> {
        if !self.closed {
            self.out.flush()?;
            self.closed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use time::OffsetDateTime;

    use super::JsonLinesSink;
    use crate::protocols::lidar::LidarFrame;
    use crate::sink::{Sink, SinkMessage};
    use crate::{LIDAR_FIELDS, LidarMeasurement, Measurement, Stamp};

    #[test]
    fn every_call_is_one_json_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_header(&LIDAR_FIELDS).unwrap();
        sink.write_measurement(&Measurement::Lidar(LidarMeasurement {
            stamp: Stamp::from_datetime(OffsetDateTime::UNIX_EPOCH),
            frame: LidarFrame {
                distance: 5,
                strength: 6,
                temperature: 7,
            },
        }))
        .unwrap();
        sink.send_msg(&SinkMessage::error("port closed")).unwrap();
        sink.shutdown().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["kind"], "header");
        assert_eq!(lines[0]["fields"][2], "distance");
        assert_eq!(lines[1]["kind"], "measurement");
        assert_eq!(lines[1]["sensor"], "lidar");
        assert_eq!(lines[1]["distance"], 5);
        assert_eq!(lines[2]["kind"], "message");
        assert_eq!(lines[2]["level"], "error");
    }
}
