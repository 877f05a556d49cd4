//! Render model derived from a stopwatch snapshot

use serde::{Deserialize, Serialize};

use crate::{
    state::{Stopwatch, TimerStatus},
    utils::formatted_seconds,
};

/// A button the stopwatch widget can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Start,
    Stop,
    Reset,
    Lap,
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Stop => "stop",
            Control::Reset => "reset",
            Control::Lap => "lap",
        }
    }

    /// Form action the button posts to
    pub fn form_action(&self) -> &'static str {
        match self {
            Control::Start => "/start",
            Control::Stop => "/stop",
            Control::Reset => "/reset",
            Control::Lap => "/lap",
        }
    }
}

/// One row of the lap list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapView {
    /// 0-based index, as accepted by delete-lap
    pub index: usize,
    /// 1-based position shown to the user
    pub position: usize,
    pub seconds: u64,
    pub display: String,
}

/// Everything the page needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchView {
    pub status: TimerStatus,
    pub elapsed_seconds: u64,
    pub display: String,
    /// Start when not running, stop when running
    pub primary: Control,
    /// Lap when running, reset when stopped, nothing when idle
    pub secondary: Option<Control>,
    pub laps: Vec<LapView>,
}

impl StopwatchView {
    pub fn from_stopwatch(stopwatch: &Stopwatch) -> Self {
        let status = stopwatch.status();
        let (primary, secondary) = match status {
            TimerStatus::Idle => (Control::Start, None),
            TimerStatus::Running => (Control::Stop, Some(Control::Lap)),
            TimerStatus::Stopped => (Control::Start, Some(Control::Reset)),
        };

        let laps = stopwatch
            .laps()
            .iter()
            .enumerate()
            .map(|(index, &seconds)| LapView {
                index,
                position: index + 1,
                seconds,
                display: formatted_seconds(seconds),
            })
            .collect();

        Self {
            status,
            elapsed_seconds: stopwatch.elapsed_seconds(),
            display: formatted_seconds(stopwatch.elapsed_seconds()),
            primary,
            secondary,
            laps,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// The lap list is hidden when there is nothing to show
    pub fn shows_laps(&self) -> bool {
        !self.laps.is_empty()
    }
}

impl From<&Stopwatch> for StopwatchView {
    fn from(stopwatch: &Stopwatch) -> Self {
        Self::from_stopwatch(stopwatch)
    }
}
