pub mod board;
pub mod cancel;
pub mod controller;
pub mod error;
pub mod journal;
pub mod motion;
pub mod obstruction;
pub mod path;
pub mod pathfind;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export the planner surface
pub use board::*;
pub use cancel::CancelToken;
pub use controller::*;
pub use error::*;
pub use journal::*;
pub use motion::*;
pub use obstruction::*;
pub use path::*;
pub use pathfind::find_path;
pub use types::*;

// =============================================================================
// Actuator seam: implemented by whatever turns directions into motor pulses
// =============================================================================

/// Acknowledgement of one dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ack;

/// Receiver of the robot's directional commands.
///
/// The sequencer calls [`send`](ActuatorSink::send) once per unit step, strictly
/// in order, and treats any error as fatal for the rest of the maneuver.
pub trait ActuatorSink {
    /// Dispatch one step and wait for the driver to accept it.
    fn send(&mut self, direction: Direction) -> Result<Ack, SinkError>;

    /// Called before the first command of every leg, including legs with no
    /// steps. Drivers use it to engage the magnet on carrying legs.
    fn begin_leg(&mut self, _leg: &Leg) -> Result<(), SinkError> {
        Ok(())
    }

    /// Name used in logs
    fn name(&self) -> &str {
        "actuator"
    }
}

impl<S: ActuatorSink + ?Sized> ActuatorSink for Box<S> {
    fn send(&mut self, direction: Direction) -> Result<Ack, SinkError> {
        (**self).send(direction)
    }

    fn begin_leg(&mut self, leg: &Leg) -> Result<(), SinkError> {
        (**self).begin_leg(leg)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
