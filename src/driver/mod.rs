//! Input commands and the fixed-cadence loop that drives a display.

pub mod command;
pub mod runner;

pub use command::{Command, Flow, Key};
pub use runner::{CommandSource, Driver, RunStats, ScriptedInput};
