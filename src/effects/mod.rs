//! The imperative shell around the pure core.
//!
//! Everything that touches the outside world lives here: the clock the run
//! loop waits on, the source operator commands are read from, and the
//! reporters that render status and history.
//!
//! # Key Concepts
//!
//! - **StateMachine**: owns heartbeat, delay, counters and history, and
//!   executes the decisions made by [`crate::core::decide`]
//! - **Collaborators**: `Clock`, `CommandSource` and `Reporter` are
//!   injected, so tests run against a `ManualClock` and scripted commands
//! - **StopSignal**: halts `run` from outside the loop

mod clock;
mod error;
mod machine;
mod report;
mod signal;
mod source;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{MachineError, RunOutcome};
pub use machine::StateMachine;
pub use report::{JsonReporter, MachineStatus, NullReporter, Reporter, TextReporter};
pub use signal::StopSignal;
pub use source::{CommandSource, LineCommands, ScriptedCommands, MENU};
