//! Active-hours window.
//!
//! The bot only streams and replies inside a daily window (default
//! 09:00–01:00 local time) so a free-tier deployment does not burn hours
//! overnight. The window may wrap past midnight.

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// A daily hour window. `start_hour` is inclusive, `end_hour` exclusive;
/// `end_hour <= start_hour` means the window wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveHours {
    pub start_hour: u32,
    pub end_hour: u32,
    /// Disabled means always active.
    pub enabled: bool,
}

impl Default for ActiveHours {
    fn default() -> Self {
        // 9 AM through 1 AM next day.
        Self {
            start_hour: 9,
            end_hour: 1,
            enabled: true,
        }
    }
}

impl ActiveHours {
    /// Whether the bot should be active at the given instant.
    pub fn is_active_at(&self, now: DateTime<Local>) -> bool {
        self.contains_hour(now.hour())
    }

    /// Whether the bot should be active right now.
    pub fn is_active_now(&self) -> bool {
        self.is_active_at(Local::now())
    }

    fn contains_hour(&self, hour: u32) -> bool {
        if !self.enabled {
            return true;
        }
        if self.start_hour == self.end_hour {
            return true;
        }
        if self.start_hour < self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}
