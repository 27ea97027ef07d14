//! Operator requests read while the machine is idle.

use super::state::SystemState;

/// A named activity the operator can start from `Idle`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Movement,
    Shooting,
    Calculation,
}

impl Command {
    /// State the machine enters to perform this activity.
    pub fn target(&self) -> SystemState {
        match self {
            Self::Movement => SystemState::Movement,
            Self::Shooting => SystemState::Shooting,
            Self::Calculation => SystemState::Calculation,
        }
    }
}

/// One parsed token from a command source.
///
/// Tokens are case-sensitive. `IDLE`, `STATUS` and `HISTORY` only trigger
/// reporting; they never change state or counters.
///
/// # Example
///
/// ```rust
/// use operator_fsm::core::{Command, Request};
///
/// assert_eq!(Request::parse("MOVEMENT"), Request::Activity(Command::Movement));
/// assert_eq!(Request::parse("STATUS"), Request::Status);
/// assert_eq!(Request::parse("movement"), Request::Invalid("movement".to_string()));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Request {
    /// Start a named activity
    Activity(Command),
    /// Stay idle, reporting status and history
    Idle,
    /// Report status only
    Status,
    /// Report history only
    History,
    /// Anything else; carries the raw token
    Invalid(String),
}

impl Request {
    /// Parse a raw token. Surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "IDLE" => Self::Idle,
            "MOVEMENT" => Self::Activity(Command::Movement),
            "SHOOTING" => Self::Activity(Command::Shooting),
            "CALCULATION" => Self::Activity(Command::Calculation),
            "STATUS" => Self::Status,
            "HISTORY" => Self::History,
            other => Self::Invalid(other.to_string()),
        }
    }
}
