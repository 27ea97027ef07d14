//! The closed set of controller states.
//!
//! Exactly one `SystemState` is active at a time. All methods are pure and
//! describe properties of a state without touching the machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the operator-driven device loop.
///
/// `Init` is the initial state and `Stopped` the only terminal one. Every
/// other state is transient and may be revisited any number of times.
///
/// # Example
///
/// ```rust
/// use operator_fsm::core::SystemState;
///
/// assert_eq!(SystemState::Movement.name(), "MOVEMENT");
/// assert!(SystemState::Stopped.is_final());
/// assert!(SystemState::Error.is_error());
/// assert!(!SystemState::Idle.is_final());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemState {
    Init,
    Idle,
    Movement,
    Shooting,
    Calculation,
    Error,
    Stopped,
}

impl SystemState {
    /// Every state, in declaration order.
    pub const ALL: [SystemState; 7] = [
        Self::Init,
        Self::Idle,
        Self::Movement,
        Self::Shooting,
        Self::Calculation,
        Self::Error,
        Self::Stopped,
    ];

    /// Upper-case display name, as shown to the operator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Idle => "IDLE",
            Self::Movement => "MOVEMENT",
            Self::Shooting => "SHOOTING",
            Self::Calculation => "CALCULATION",
            Self::Error => "ERROR",
            Self::Stopped => "STOPPED",
        }
    }

    /// Check if this is the terminal state.
    ///
    /// Once the machine is `Stopped` and shutdown has run, no further
    /// meaningful work is performed.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Check if this is the domain error state.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if this state performs one of the named activities.
    pub fn is_activity(&self) -> bool {
        matches!(self, Self::Movement | Self::Shooting | Self::Calculation)
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(SystemState::Init.name(), "INIT");
        assert_eq!(SystemState::Idle.name(), "IDLE");
        assert_eq!(SystemState::Movement.name(), "MOVEMENT");
        assert_eq!(SystemState::Shooting.name(), "SHOOTING");
        assert_eq!(SystemState::Calculation.name(), "CALCULATION");
        assert_eq!(SystemState::Error.name(), "ERROR");
        assert_eq!(SystemState::Stopped.name(), "STOPPED");
    }

    #[test]
    fn only_stopped_is_final() {
        let finals: Vec<_> = SystemState::ALL.iter().filter(|s| s.is_final()).collect();
        assert_eq!(finals, vec![&SystemState::Stopped]);
    }

    #[test]
    fn only_error_is_error() {
        let errors: Vec<_> = SystemState::ALL.iter().filter(|s| s.is_error()).collect();
        assert_eq!(errors, vec![&SystemState::Error]);
    }

    #[test]
    fn activities_are_the_three_named_ones() {
        assert!(SystemState::Movement.is_activity());
        assert!(SystemState::Shooting.is_activity());
        assert!(SystemState::Calculation.is_activity());
        assert!(!SystemState::Idle.is_activity());
        assert!(!SystemState::Error.is_activity());
    }

    #[test]
    fn display_matches_name() {
        for state in SystemState::ALL {
            assert_eq!(state.to_string(), state.name());
        }
    }

    #[test]
    fn state_serializes_as_upper_case_name() {
        let json = serde_json::to_string(&SystemState::Calculation).unwrap();
        assert_eq!(json, "\"CALCULATION\"");

        let deserialized: SystemState = serde_json::from_str("\"STOPPED\"").unwrap();
        assert_eq!(deserialized, SystemState::Stopped);
    }
}
