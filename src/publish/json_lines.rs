//! Newline-delimited JSON publisher
//!
//! Writes each message as `{"topic": ..., "retain": ..., "payload": ...}` on
//! its own line, for a bridge process that forwards lines to the broker.

use std::io::Write;

use super::{Message, Publisher};
use crate::{AnalysisError, Result};

pub struct JsonLinesPublisher<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Publisher for JsonLinesPublisher<W> {
    fn publish(&mut self, message: Message) -> Result<()> {
        let publish_error = |e: &dyn std::fmt::Display| AnalysisError::PublishError {
            topic: message.topic.clone(),
            message: e.to_string(),
        };

        let line = serde_json::to_string(&message).map_err(|e| publish_error(&e))?;
        writeln!(self.writer, "{}", line).map_err(|e| publish_error(&e))?;
        self.writer.flush().map_err(|e| publish_error(&e))
    }
}
