//! Heartbeat-driven state machine that executes the pure transitions.

use crate::config::MachineConfig;
use crate::core::{decide, Action, Counters, HistoryEntry, Request, StateHistory, SystemState};
use crate::effects::clock::Clock;
use crate::effects::error::{MachineError, RunOutcome};
use crate::effects::report::{MachineStatus, Reporter};
use crate::effects::signal::StopSignal;
use crate::effects::source::CommandSource;
use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// The operator-driven device loop.
///
/// Owns the current state, heartbeat, delay, counters and history. The
/// clock, command source and reporter are passed in by the caller.
///
/// # Example
///
/// ```rust
/// use operator_fsm::core::SystemState;
/// use operator_fsm::effects::{
///     ManualClock, NullReporter, RunOutcome, ScriptedCommands, StateMachine,
/// };
///
/// let clock = ManualClock::new(0);
/// let mut commands = ScriptedCommands::new(["MOVEMENT", "MOVEMENT", "MOVEMENT"]);
/// let mut machine = StateMachine::new(1_000);
///
/// let outcome = machine.run(&clock, &mut commands, &mut NullReporter).unwrap();
///
/// assert_eq!(outcome, RunOutcome::InputClosed);
/// assert_eq!(machine.current_state(), SystemState::Idle);
/// assert_eq!(machine.move_count(), 0);
/// ```
#[derive(Debug)]
pub struct StateMachine {
    current: SystemState,
    heartbeat: u64,
    delay: u64,
    counters: Counters,
    history: StateHistory,
    shut_down: bool,
    steps_taken: u64,
    max_steps: Option<u64>,
    stop: StopSignal,
    run_id: Uuid,
    started_at: DateTime<Utc>,
}

impl StateMachine {
    /// Create a machine in `Init` with the given dispatch delay.
    pub fn new(delay: u64) -> Self {
        Self {
            current: SystemState::Init,
            heartbeat: 0,
            delay,
            counters: Counters::default(),
            history: StateHistory::seeded(SystemState::Init, 0),
            shut_down: false,
            steps_taken: 0,
            max_steps: None,
            stop: StopSignal::new(),
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(config.delay_ms).with_max_steps(config.max_steps)
    }

    /// Limit how many steps `run` performs before returning.
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn current_state(&self) -> SystemState {
        self.current
    }

    pub fn heartbeat(&self) -> u64 {
        self.heartbeat
    }

    pub fn delay(&self) -> u64 {
        self.delay
    }

    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    pub fn error_count(&self) -> u32 {
        self.counters.error_count
    }

    /// Override the error count. Normal transitions never lower it.
    pub fn set_error_count(&mut self, count: u32) {
        self.counters.error_count = count;
    }

    pub fn reset_error_count(&mut self) {
        self.set_error_count(0);
    }

    pub fn move_count(&self) -> u32 {
        self.counters.move_count
    }

    pub fn set_move_count(&mut self, count: u32) {
        self.counters.move_count = count;
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Check if the machine is stopped and its history has been cleared.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Handle for halting `run` from outside the loop.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn status(&self) -> MachineStatus {
        MachineStatus {
            run_id: self.run_id,
            started_at: self.started_at,
            state: self.current,
            heartbeat: self.heartbeat,
            delay: self.delay,
            error_count: self.counters.error_count,
            move_count: self.counters.move_count,
        }
    }

    /// Drive the machine until it shuts down or is interrupted.
    ///
    /// Each iteration checks the stop signal and step budget, then reads the
    /// clock. A step runs once `now - heartbeat >= delay`; otherwise the
    /// loop waits on the clock until the next heartbeat is due.
    pub fn run<C, S, R>(
        &mut self,
        clock: &C,
        source: &mut S,
        reporter: &mut R,
    ) -> Result<RunOutcome, MachineError>
    where
        C: Clock + ?Sized,
        S: CommandSource + ?Sized,
        R: Reporter + ?Sized,
    {
        let span = info_span!("run", run_id = %self.run_id);
        let _enter = span.enter();
        info!(delay = self.delay, state = %self.current, "Starting state machine");

        loop {
            if self.shut_down {
                info!(steps = self.steps_taken, "State machine stopped");
                return Ok(RunOutcome::Stopped);
            }
            if self.stop.is_stopped() {
                info!(state = %self.current, "Stop requested, halting");
                return Ok(RunOutcome::Halted);
            }
            if self.max_steps.is_some_and(|max| self.steps_taken >= max) {
                info!(steps = self.steps_taken, "Step limit reached");
                return Ok(RunOutcome::StepLimit);
            }

            let now = clock.now_ms();
            if now.saturating_sub(self.heartbeat) < self.delay {
                clock.sleep_until(self.heartbeat.saturating_add(self.delay));
                continue;
            }

            match self.step_at(now, source, reporter) {
                Ok(_) => {}
                Err(MachineError::InputClosed) => {
                    info!(state = %self.current, "Command source closed");
                    return Ok(RunOutcome::InputClosed);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform one dispatch cycle at the current clock reading.
    ///
    /// Returns the state the machine is in afterwards.
    pub fn step<C, S, R>(
        &mut self,
        clock: &C,
        source: &mut S,
        reporter: &mut R,
    ) -> Result<SystemState, MachineError>
    where
        C: Clock + ?Sized,
        S: CommandSource + ?Sized,
        R: Reporter + ?Sized,
    {
        self.step_at(clock.now_ms(), source, reporter)
    }

    fn step_at<S, R>(
        &mut self,
        now: u64,
        source: &mut S,
        reporter: &mut R,
    ) -> Result<SystemState, MachineError>
    where
        S: CommandSource + ?Sized,
        R: Reporter + ?Sized,
    {
        if self.shut_down {
            debug!("Step on a shut down machine ignored");
            return Ok(self.current);
        }

        // Heartbeat and history timestamps never go backwards.
        let now = now.max(self.heartbeat);
        let from = self.current;

        let request = match from {
            SystemState::Idle => match source.next_token().map_err(MachineError::Input)? {
                Some(token) => Some(Request::parse(&token)),
                None => return Err(MachineError::InputClosed),
            },
            _ => None,
        };

        announce(from);
        let decision = decide(from, self.counters, request.as_ref());
        let shutting_down = decision.shuts_down();

        self.current = decision.next;
        self.counters = decision.counters;
        self.heartbeat = now;
        self.steps_taken += 1;

        if !shutting_down {
            self.history.record(HistoryEntry::new(self.current, now));
        }
        debug!(from = %from, to = %self.current, timestamp = now, "Transition");

        if from.is_error() && self.current.is_final() {
            warn!(
                error_count = self.counters.error_count,
                "Error threshold reached, entering Stopped"
            );
        }

        for action in decision.actions {
            self.apply(action, reporter);
        }

        Ok(self.current)
    }

    fn apply<R: Reporter + ?Sized>(&mut self, action: Action, reporter: &mut R) {
        match action {
            Action::SetDelay(delay) => self.delay = delay,
            Action::ReportStatus => reporter.report_status(&self.status()),
            Action::ReportHistory => reporter.report_history(self.history.entries()),
            Action::ReportInvalidInput(token) => {
                warn!(token = %token, "Invalid process requested");
                reporter.report_invalid_input(&token);
            }
            Action::Shutdown => {
                info!("System stopped, shutting down...");
                self.history.clear();
                self.shut_down = true;
            }
        }
    }
}

fn announce(state: SystemState) {
    match state {
        SystemState::Init => info!("Initializing system..."),
        SystemState::Idle => debug!("Awaiting command"),
        SystemState::Movement => info!("Moving..."),
        SystemState::Shooting => info!("Shooting..."),
        SystemState::Calculation => info!("Performing calculation..."),
        SystemState::Error => info!("Error occurred, performing error handling..."),
        SystemState::Stopped => {}
    }
}
