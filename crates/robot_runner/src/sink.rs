//! Concrete actuator sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::trace;

use robot_core::{Ack, ActuatorSink, Direction, Leg, LegKind, SinkError, commands_to_string};

/// Writes one command symbol per line and flushes after each, which is what
/// the serial bridge on the robot expects.
pub struct WriterSink<W: Write> {
    writer: W,
    name: String,
    sent: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, name: &str) -> Self {
        Self {
            writer,
            name: name.to_string(),
            sent: 0,
        }
    }

    /// Commands written so far.
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<File> {
    /// Open a device node or plain file for appending.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Self::new(file, &path.display().to_string()))
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), "stdout")
    }
}

impl<W: Write> ActuatorSink for WriterSink<W> {
    fn send(&mut self, direction: Direction) -> Result<Ack, SinkError> {
        writeln!(self.writer, "{}", direction.symbol())?;
        self.writer.flush()?;
        self.sent += 1;
        trace!(sink = %self.name, command = %direction, "sent");
        Ok(Ack)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keeps commands in memory instead of moving anything. Used for dry runs and
/// when no device is configured.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<Direction>,
    legs: Vec<LegKind>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` commands, then reject every further one.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[Direction] {
        &self.commands
    }

    /// Legs in the order they were started.
    pub fn legs(&self) -> &[LegKind] {
        &self.legs
    }

    pub fn command_string(&self) -> String {
        commands_to_string(&self.commands)
    }
}

impl ActuatorSink for RecordingSink {
    fn send(&mut self, direction: Direction) -> Result<Ack, SinkError> {
        if self.fail_after == Some(self.commands.len()) {
            return Err(SinkError::Rejected(format!(
                "recording sink stopped after {} commands",
                self.commands.len()
            )));
        }
        self.commands.push(direction);
        Ok(Ack)
    }

    fn begin_leg(&mut self, leg: &Leg) -> Result<(), SinkError> {
        self.legs.push(leg.kind);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod sink_tests;
