//! Stopwatch state machine

use serde::{Deserialize, Serialize};

/// Lifecycle of the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Never started, or freshly reset
    Idle,
    Running,
    /// Paused after having run
    Stopped,
}

/// User-facing operations on the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Reset,
    Lap,
    DeleteLap(usize),
}

impl Action {
    /// Short name used for logging and last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Reset => "reset",
            Action::Lap => "lap",
            Action::DeleteLap(_) => "delete-lap",
        }
    }
}

/// Whether an operation changed the stopwatch or was a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Applied,
    Ignored,
}

impl TimerStatus {
    /// Lowercase name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Stopped => "stopped",
        }
    }
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied)
    }

    fn from_applied(applied: bool) -> Self {
        if applied {
            Transition::Applied
        } else {
            Transition::Ignored
        }
    }
}

/// Elapsed whole seconds, status and recorded laps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stopwatch {
    elapsed_seconds: u64,
    status: TimerStatus,
    laps: Vec<u64>,
}

impl Stopwatch {
    /// Create an idle stopwatch starting from `initial_seconds`
    pub fn new(initial_seconds: u64) -> Self {
        Self {
            elapsed_seconds: initial_seconds,
            status: TimerStatus::Idle,
            laps: Vec::new(),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Apply a user action
    pub fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::Start => self.start(),
            Action::Stop => self.stop(),
            Action::Reset => self.reset(),
            Action::Lap => self.lap(),
            Action::DeleteLap(index) => self.delete_lap(index),
        }
    }

    pub fn start(&mut self) -> Transition {
        if self.is_running() {
            return Transition::Ignored;
        }
        self.status = TimerStatus::Running;
        Transition::Applied
    }

    pub fn stop(&mut self) -> Transition {
        if !self.is_running() {
            return Transition::Ignored;
        }
        self.status = TimerStatus::Stopped;
        Transition::Applied
    }

    /// Zero the counter and drop all laps. Refused while running.
    pub fn reset(&mut self) -> Transition {
        if self.is_running() {
            return Transition::Ignored;
        }
        self.elapsed_seconds = 0;
        self.laps.clear();
        self.status = TimerStatus::Idle;
        Transition::Applied
    }

    pub fn lap(&mut self) -> Transition {
        if !self.is_running() {
            return Transition::Ignored;
        }
        self.laps.push(self.elapsed_seconds);
        Transition::Applied
    }

    /// Remove the lap at a 0-based position; out of range is a no-op
    pub fn delete_lap(&mut self, index: usize) -> Transition {
        let in_range = index < self.laps.len();
        if in_range {
            self.laps.remove(index);
        }
        Transition::from_applied(in_range)
    }

    /// Advance by one second. Only counts while running.
    pub fn tick(&mut self) -> Transition {
        if !self.is_running() {
            return Transition::Ignored;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        Transition::Applied
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new(0)
    }
}
