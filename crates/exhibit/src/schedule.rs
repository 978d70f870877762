//! Daily opening hours of the exhibition

use chrono::{Local, NaiveTime};

use crate::{ExhibitError, Result};

/// When the curator is allowed to produce exhibitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Open around the clock
    Always,
    /// Open inside a daily window
    Daily(ScheduleWindow),
}

/// Inclusive daily time window; `start > end` wraps past midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ScheduleWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

impl Schedule {
    /// Daily window from `HH:MM` or `HH:MM:SS` strings
    pub fn window(start: &str, end: &str) -> Result<Self> {
        Ok(Schedule::Daily(ScheduleWindow::new(
            parse_time(start)?,
            parse_time(end)?,
        )))
    }

    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        match self {
            Schedule::Always => true,
            Schedule::Daily(window) => window.contains(time),
        }
    }

    /// Whether the exhibition is open right now (local time)
    pub fn is_open(&self) -> bool {
        self.is_open_at(Local::now().time())
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ExhibitError::Schedule(format!("expected HH:MM or HH:MM:SS, got '{}'", value)))
}
