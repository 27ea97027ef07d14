//! The pure transition function.
//!
//! `decide` maps the current state, the counters and (while idle) the
//! operator's request to the next state, the updated counters and a list of
//! side effects for the shell to carry out. It is total: every state has a
//! defined successor for every input.

use super::command::Request;
use super::state::SystemState;

/// Movement count at which the machine must shoot.
pub const MOVE_THRESHOLD: u32 = 3;

/// Error count at which the machine stops for good.
pub const ERROR_THRESHOLD: u32 = 3;

/// Delay installed by the `Init` handler.
pub const INIT_DELAY_MS: u64 = 1000;

/// Counters carried between steps.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Counters {
    /// Movements since the last completed shot
    pub move_count: u32,
    /// Error-state visits over the machine's lifetime
    pub error_count: u32,
}

/// Side effect requested by a transition.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Replace the dispatch delay
    SetDelay(u64),
    ReportStatus,
    ReportHistory,
    /// Tell the operator the token was not understood
    ReportInvalidInput(String),
    /// Clear the history; the machine is done
    Shutdown,
}

/// Outcome of one transition.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Decision {
    pub next: SystemState,
    pub counters: Counters,
    pub actions: Vec<Action>,
}

impl Decision {
    fn to(next: SystemState, counters: Counters) -> Self {
        Self {
            next,
            counters,
            actions: Vec::new(),
        }
    }

    fn with(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Check if the shell must shut the machine down.
    pub fn shuts_down(&self) -> bool {
        self.actions.contains(&Action::Shutdown)
    }
}

/// Decide the next step.
///
/// `request` is only consulted in `Idle`. `None` there means nothing was
/// read, and the machine stays idle.
///
/// # Example
///
/// ```rust
/// use operator_fsm::core::{decide, Command, Counters, Request, SystemState};
///
/// let counters = Counters { move_count: 2, error_count: 0 };
/// let decision = decide(SystemState::Movement, counters, None);
///
/// assert_eq!(decision.next, SystemState::Shooting);
/// assert_eq!(decision.counters.move_count, 3);
///
/// let request = Request::Activity(Command::Calculation);
/// let decision = decide(SystemState::Idle, Counters::default(), Some(&request));
/// assert_eq!(decision.next, SystemState::Calculation);
/// ```
pub fn decide(state: SystemState, counters: Counters, request: Option<&Request>) -> Decision {
    match state {
        SystemState::Init => Decision::to(SystemState::Idle, counters)
            .with(Action::SetDelay(INIT_DELAY_MS))
            .with(Action::ReportStatus),
        SystemState::Idle => decide_idle(counters, request),
        SystemState::Movement => {
            let counters = Counters {
                move_count: counters.move_count.saturating_add(1),
                ..counters
            };
            let next = if counters.move_count >= MOVE_THRESHOLD {
                SystemState::Shooting
            } else {
                SystemState::Idle
            };
            Decision::to(next, counters)
        }
        SystemState::Shooting => Decision::to(
            SystemState::Idle,
            Counters {
                move_count: 0,
                ..counters
            },
        ),
        SystemState::Calculation => {
            let next = if counters.move_count == 0 {
                SystemState::Error
            } else {
                SystemState::Idle
            };
            Decision::to(next, counters)
        }
        SystemState::Error => {
            let counters = Counters {
                error_count: counters.error_count.saturating_add(1),
                ..counters
            };
            let next = if counters.error_count >= ERROR_THRESHOLD {
                SystemState::Stopped
            } else {
                SystemState::Idle
            };
            Decision::to(next, counters)
        }
        SystemState::Stopped => {
            Decision::to(SystemState::Stopped, counters).with(Action::Shutdown)
        }
    }
}

fn decide_idle(counters: Counters, request: Option<&Request>) -> Decision {
    let stay = Decision::to(SystemState::Idle, counters);
    match request {
        None => stay,
        Some(Request::Activity(command)) => Decision::to(command.target(), counters),
        Some(Request::Idle) => stay.with(Action::ReportStatus).with(Action::ReportHistory),
        Some(Request::Status) => stay.with(Action::ReportStatus),
        Some(Request::History) => stay.with(Action::ReportHistory),
        Some(Request::Invalid(token)) => stay.with(Action::ReportInvalidInput(token.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Command;

    fn counters(move_count: u32, error_count: u32) -> Counters {
        Counters {
            move_count,
            error_count,
        }
    }

    #[test]
    fn init_goes_idle_and_sets_delay() {
        let decision = decide(SystemState::Init, Counters::default(), None);
        assert_eq!(decision.next, SystemState::Idle);
        assert_eq!(
            decision.actions,
            vec![Action::SetDelay(INIT_DELAY_MS), Action::ReportStatus]
        );
    }

    #[test]
    fn idle_dispatches_activities() {
        for (command, target) in [
            (Command::Movement, SystemState::Movement),
            (Command::Shooting, SystemState::Shooting),
            (Command::Calculation, SystemState::Calculation),
        ] {
            let request = Request::Activity(command);
            let decision = decide(SystemState::Idle, counters(1, 1), Some(&request));
            assert_eq!(decision.next, target);
            assert_eq!(decision.counters, counters(1, 1));
            assert!(decision.actions.is_empty());
        }
    }

    #[test]
    fn idle_invalid_input_is_a_no_op() {
        let request = Request::Invalid("JUMP".to_string());
        let decision = decide(SystemState::Idle, counters(2, 1), Some(&request));

        assert_eq!(decision.next, SystemState::Idle);
        assert_eq!(decision.counters, counters(2, 1));
        assert_eq!(
            decision.actions,
            vec![Action::ReportInvalidInput("JUMP".to_string())]
        );
    }

    #[test]
    fn idle_reporting_requests_stay_idle() {
        let decision = decide(SystemState::Idle, counters(0, 0), Some(&Request::Idle));
        assert_eq!(decision.next, SystemState::Idle);
        assert_eq!(
            decision.actions,
            vec![Action::ReportStatus, Action::ReportHistory]
        );

        let decision = decide(SystemState::Idle, counters(0, 0), Some(&Request::Status));
        assert_eq!(decision.actions, vec![Action::ReportStatus]);

        let decision = decide(SystemState::Idle, counters(0, 0), Some(&Request::History));
        assert_eq!(decision.actions, vec![Action::ReportHistory]);
    }

    #[test]
    fn movement_shoots_on_third_move() {
        assert_eq!(
            decide(SystemState::Movement, counters(0, 0), None).next,
            SystemState::Idle
        );
        assert_eq!(
            decide(SystemState::Movement, counters(1, 0), None).next,
            SystemState::Idle
        );

        let third = decide(SystemState::Movement, counters(2, 0), None);
        assert_eq!(third.next, SystemState::Shooting);
        assert_eq!(third.counters.move_count, 3);
    }

    #[test]
    fn shooting_resets_move_count() {
        let decision = decide(SystemState::Shooting, counters(3, 2), None);
        assert_eq!(decision.next, SystemState::Idle);
        assert_eq!(decision.counters, counters(0, 2));
    }

    #[test]
    fn calculation_without_moves_is_an_error() {
        assert_eq!(
            decide(SystemState::Calculation, counters(0, 0), None).next,
            SystemState::Error
        );
        assert_eq!(
            decide(SystemState::Calculation, counters(1, 0), None).next,
            SystemState::Idle
        );
    }

    #[test]
    fn error_stops_at_threshold() {
        let first = decide(SystemState::Error, counters(0, 0), None);
        assert_eq!(first.next, SystemState::Idle);
        assert_eq!(first.counters.error_count, 1);

        let last = decide(SystemState::Error, counters(0, ERROR_THRESHOLD - 1), None);
        assert_eq!(last.next, SystemState::Stopped);
        assert_eq!(last.counters.error_count, ERROR_THRESHOLD);
        assert!(!last.shuts_down());
    }

    #[test]
    fn stopped_is_absorbing_and_shuts_down() {
        let decision = decide(SystemState::Stopped, counters(1, 3), None);
        assert_eq!(decision.next, SystemState::Stopped);
        assert_eq!(decision.counters, counters(1, 3));
        assert!(decision.shuts_down());
    }

    #[test]
    fn request_is_ignored_outside_idle() {
        let request = Request::Activity(Command::Shooting);
        let decision = decide(SystemState::Calculation, counters(1, 0), Some(&request));
        assert_eq!(decision.next, SystemState::Idle);
    }
}
