//! Operator FSM: a heartbeat-driven finite-state controller
//!
//! The controller models an operator-driven device loop. It initializes,
//! idles awaiting a command, performs one of several named activities
//! (movement, shooting, calculation), accumulates errors, and can shut down
//! permanently.
//!
//! The crate follows a "pure core, imperative shell" layout. The transition
//! rules are a pure function over the state and counters; the shell owns
//! the heartbeat, the history and the collaborators that do I/O.
//!
//! # Core Concepts
//!
//! - **SystemState**: the seven-member state enumeration
//! - **decide**: the pure, total transition function
//! - **StateHistory**: append-only log of `(state, timestamp)` pairs
//! - **StateMachine**: run loop throttled by a heartbeat and a delay
//! - **Clock / CommandSource / Reporter**: injected collaborators
//!
//! # Example
//!
//! ```rust
//! use operator_fsm::core::SystemState;
//! use operator_fsm::effects::{ManualClock, NullReporter, RunOutcome, ScriptedCommands};
//! use operator_fsm::StateMachine;
//!
//! let clock = ManualClock::new(0);
//! let mut commands = ScriptedCommands::new(["CALCULATION"; 3]);
//! let mut machine = StateMachine::new(1_000);
//!
//! let outcome = machine.run(&clock, &mut commands, &mut NullReporter).unwrap();
//!
//! assert_eq!(outcome, RunOutcome::Stopped);
//! assert_eq!(machine.current_state(), SystemState::Stopped);
//! assert_eq!(machine.error_count(), 3);
//! assert!(machine.history().is_empty());
//! ```

pub mod config;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use config::MachineConfig;
pub use self::core::{HistoryEntry, StateHistory, SystemState};
pub use effects::{Clock, CommandSource, Reporter, RunOutcome, StateMachine};
