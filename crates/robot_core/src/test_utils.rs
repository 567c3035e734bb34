//! Helpers shared by the unit tests.

use crate::error::SinkError;
use crate::motion::{Leg, LegKind};
use crate::types::{Coord, Direction, parse_square};
use crate::{Ack, ActuatorSink};

pub fn sq(name: &str) -> Coord {
    parse_square(name).unwrap()
}

/// Records every command; optionally refuses the command after `fail_after`
/// successful ones.
#[derive(Debug, Default)]
pub struct TapeSink {
    pub commands: Vec<Direction>,
    pub legs: Vec<LegKind>,
    pub fail_after: Option<usize>,
}

impl TapeSink {
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Default::default()
        }
    }

    pub fn symbols(&self) -> String {
        self.commands.iter().map(|d| d.symbol()).collect()
    }
}

impl ActuatorSink for TapeSink {
    fn send(&mut self, direction: Direction) -> Result<Ack, SinkError> {
        if self.fail_after == Some(self.commands.len()) {
            return Err(SinkError::Rejected("motor stalled".to_string()));
        }
        self.commands.push(direction);
        Ok(Ack)
    }

    fn begin_leg(&mut self, leg: &Leg) -> Result<(), SinkError> {
        self.legs.push(leg.kind);
        Ok(())
    }

    fn name(&self) -> &str {
        "tape"
    }
}
