//! Runner for the piece-relocating robot
//!
//! This crate wraps `robot_core` with everything needed to operate it:
//! - TOML configuration (home square, settling delay, actuator device)
//! - JSON move requests and responses
//! - Actuator sinks writing command symbols to a device, or recording them
//! - Journal persistence for recovering from an aborted maneuver
//!
//! # Usage
//!
//! ```bash
//! # Carry out one move on a board read from JSON
//! cargo run -p robot_runner -- move e2e4 --board board.json --config robot.toml
//!
//! # Answer one JSON request per line on stdin
//! cargo run -p robot_runner -- stdio --config robot.toml
//! ```

mod config;
mod error;
mod journal_store;
pub mod logging;
mod request;
mod runner;
mod sink;

pub use config::*;
pub use error::*;
pub use journal_store::*;
pub use request::*;
pub use runner::*;
pub use sink::*;
