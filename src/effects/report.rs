//! Rendering of machine status and history for a human observer.
//!
//! Reporters are presentation only. They return nothing, and a failed write
//! is logged rather than propagated so it can never influence a transition.

use crate::core::{HistoryEntry, SystemState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::warn;
use uuid::Uuid;

/// Point-in-time view of the machine handed to reporters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineStatus {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub state: SystemState,
    pub heartbeat: u64,
    pub delay: u64,
    pub error_count: u32,
    pub move_count: u32,
}

/// Renders status and history.
pub trait Reporter {
    fn report_status(&mut self, status: &MachineStatus);

    fn report_history(&mut self, history: &[HistoryEntry]);

    /// Called when an idle machine receives a token it does not understand.
    fn report_invalid_input(&mut self, _token: &str) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report_status(&mut self, status: &MachineStatus) {
        (**self).report_status(status)
    }

    fn report_history(&mut self, history: &[HistoryEntry]) {
        (**self).report_history(history)
    }

    fn report_invalid_input(&mut self, token: &str) {
        (**self).report_invalid_input(token)
    }
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report_status(&mut self, _status: &MachineStatus) {}

    fn report_history(&mut self, _history: &[HistoryEntry]) {}
}

fn log_write_failure(what: &str, result: io::Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "Failed to write {what}");
    }
}

/// Plain-text console rendering.
///
/// ```text
/// FSM Current Status:
/// 1.Current State: IDLE
/// 2.Last Heart Beat: 1000
/// 3.Delay: 1000
/// 4.Error Count: 0
/// ```
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_status(&mut self, status: &MachineStatus) -> io::Result<()> {
        writeln!(self.out, "FSM Current Status:")?;
        writeln!(self.out, "1.Current State: {}", status.state)?;
        writeln!(self.out, "2.Last Heart Beat: {}", status.heartbeat)?;
        writeln!(self.out, "3.Delay: {}", status.delay)?;
        writeln!(self.out, "4.Error Count: {}", status.error_count)?;
        self.out.flush()
    }

    fn write_history(&mut self, history: &[HistoryEntry]) -> io::Result<()> {
        writeln!(self.out, "{{State, Time}}")?;
        for entry in history {
            writeln!(self.out, "{{{}, {}}}", entry.state, entry.timestamp)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report_status(&mut self, status: &MachineStatus) {
        let result = self.write_status(status);
        log_write_failure("status", result);
    }

    fn report_history(&mut self, history: &[HistoryEntry]) {
        let result = self.write_history(history);
        log_write_failure("history", result);
    }

    fn report_invalid_input(&mut self, token: &str) {
        let result = writeln!(self.out, "Invalid process: {token}").and_then(|_| self.out.flush());
        log_write_failure("invalid input notice", result);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum JsonRecord<'a> {
    Status(&'a MachineStatus),
    History(&'a [HistoryEntry]),
    InvalidInput(&'a str),
}

/// Newline-delimited JSON rendering, one object per report.
///
/// Records look like `{"status":{...}}`, `{"history":[...]}` and
/// `{"invalid_input":"JUMP"}`.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, record: &JsonRecord<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report_status(&mut self, status: &MachineStatus) {
        let result = self.write_record(&JsonRecord::Status(status));
        log_write_failure("status", result);
    }

    fn report_history(&mut self, history: &[HistoryEntry]) {
        let result = self.write_record(&JsonRecord::History(history));
        log_write_failure("history", result);
    }

    fn report_invalid_input(&mut self, token: &str) {
        let result = self.write_record(&JsonRecord::InvalidInput(token));
        log_write_failure("invalid input notice", result);
    }
}
