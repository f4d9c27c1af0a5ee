use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A fixed retrospective period over which contributions are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    AllTime,
    LastYear,
    LastMonth,
    LastWeek,
}

impl Window {
    /// Report order.
    pub const ALL: [Window; 4] = [
        Window::AllTime,
        Window::LastYear,
        Window::LastMonth,
        Window::LastWeek,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Window::AllTime => "Totals",
            Window::LastYear => "Last year",
            Window::LastMonth => "Last month",
            Window::LastWeek => "Last week",
        }
    }

    /// How far back the window reaches; `None` for all-time.
    pub fn span(self) -> Option<Duration> {
        match self {
            Window::AllTime => None,
            Window::LastYear => Some(Duration::hours(8760)),
            Window::LastMonth => Some(Duration::hours(720)),
            Window::LastWeek => Some(Duration::hours(168)),
        }
    }

    pub(crate) fn position(self) -> usize {
        match self {
            Window::AllTime => 0,
            Window::LastYear => 1,
            Window::LastMonth => 2,
            Window::LastWeek => 3,
        }
    }
}

/// Window boundaries, fixed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoffs {
    now: DateTime<Utc>,
    year_ago: DateTime<Utc>,
    month_ago: DateTime<Utc>,
    week_ago: DateTime<Utc>,
}

impl Cutoffs {
    pub fn at(now: DateTime<Utc>) -> Self {
        let before = |window: Window| window.span().map_or(now, |span| now - span);
        Self {
            now,
            year_ago: before(Window::LastYear),
            month_ago: before(Window::LastMonth),
            week_ago: before(Window::LastWeek),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn cutoff(&self, window: Window) -> Option<DateTime<Utc>> {
        match window {
            Window::AllTime => None,
            Window::LastYear => Some(self.year_ago),
            Window::LastMonth => Some(self.month_ago),
            Window::LastWeek => Some(self.week_ago),
        }
    }

    /// Whether `time` lies strictly after the window's cutoff. Every
    /// instant is inside the all-time window.
    pub fn contains(&self, window: Window, time: DateTime<Utc>) -> bool {
        self.cutoff(window).map_or(true, |cutoff| time > cutoff)
    }

    /// Like [`Cutoffs::contains`] for a Unix timestamp. Timestamps chrono
    /// cannot represent only count towards all-time.
    pub fn contains_timestamp(&self, window: Window, seconds: i64) -> bool {
        match DateTime::from_timestamp(seconds, 0) {
            Some(time) => self.contains(window, time),
            None => window == Window::AllTime,
        }
    }
}
