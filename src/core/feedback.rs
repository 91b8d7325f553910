// feedback module - the range indicator and the short lived "copied" flash
use super::selection::Selection;
use std::time::{Duration, Instant};

pub const FLASH_DURATION: Duration = Duration::from_millis(2000);

pub fn indicator_text(selection: &Selection) -> Option<String> {
    selection.range().map(|range| format!("Lines: {}", range))
}

/// A message shown in place of the range indicator until it expires.
#[derive(Clone, Debug)]
pub struct Flash {
    pub message: String,
    since: Instant,
}

impl Flash {
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Instant::now())
    }

    pub fn at(message: impl Into<String>, since: Instant) -> Self {
        Self {
            message: message.into(),
            since,
        }
    }

    pub fn copied() -> Self {
        Self::new("✓ Copied!")
    }

    pub fn link_copied() -> Self {
        Self::new("✓ Link copied!")
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.since) >= FLASH_DURATION
    }

    // Time left before the indicator reverts, used to schedule a repaint
    pub fn remaining(&self, now: Instant) -> Duration {
        FLASH_DURATION.saturating_sub(now.saturating_duration_since(self.since))
    }
}

/// Text for the indicator slot: a live flash wins over the range.
pub fn header_text(selection: &Selection, flash: Option<&Flash>, now: Instant) -> Option<String> {
    match flash {
        Some(flash) if !flash.is_expired(now) => Some(flash.message.clone()),
        _ => indicator_text(selection),
    }
}
