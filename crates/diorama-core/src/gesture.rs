#![forbid(unsafe_code)]

//! Double-click debouncing and same-tick claim suppression.
//!
//! [`GestureDetector`] tracks the last accepted click per logical pointer
//! button and classifies each new click as single or double. A separate
//! same-tick "claim" flag lets a more specific handler (a hotspot under the
//! cursor) consume a click so the broader default handler (manual zoom)
//! skips it for the rest of that tick.
//!
//! # Invariants
//!
//! 1. A double-click requires strictly positive elapsed time since the last
//!    click on the same button, within the configured window.
//! 2. Accepting a double-click clears that button's stored timestamp, so a
//!    third rapid click starts a fresh single/double cycle.
//! 3. The claim flag never survives a tick boundary: [`GestureDetector::begin_tick`]
//!    clears it unconditionally.
//!
//! # Failure Modes
//!
//! - Two clicks carrying the same instant (duplicate event delivery) produce
//!   [`ClickKind::None`] for the second; the stored timestamp is untouched.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Logical pointer buttons the navigation layer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Drill-in button.
    Primary,
    /// Back-out button.
    Secondary,
}

impl PointerButton {
    #[inline]
    const fn slot(self) -> usize {
        match self {
            PointerButton::Primary => 0,
            PointerButton::Secondary => 1,
        }
    }
}

/// Classification of a registered click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Ignored (duplicate timestamp).
    None,
    /// First click of a potential pair.
    Single,
    /// Second click within the window.
    Double,
}

/// Timing thresholds for click classification.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Time window for double-click detection (default: 300ms).
    pub double_click_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_click_window: Duration::from_millis(300),
        }
    }
}

// ---------------------------------------------------------------------------
// GestureDetector
// ---------------------------------------------------------------------------

/// Per-button double-click debouncer with a same-tick claim flag.
#[derive(Debug)]
pub struct GestureDetector {
    config: GestureConfig,
    last_click: [Option<Instant>; 2],
    claimed: bool,
}

impl GestureDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_click: [None, None],
            claimed: false,
        }
    }

    /// Classify a click on `button` at time `now`.
    ///
    /// A click counts as a double when the elapsed time since the last
    /// registered click on the same button is within the window and strictly
    /// positive. Accepting a double resets the button's timestamp so a third
    /// rapid click cannot re-trigger.
    pub fn register_click(&mut self, button: PointerButton, now: Instant) -> ClickKind {
        let slot = button.slot();
        if let Some(last) = self.last_click[slot] {
            let elapsed = now.saturating_duration_since(last);
            if elapsed.is_zero() {
                return ClickKind::None;
            }
            if elapsed <= self.config.double_click_window {
                self.last_click[slot] = None;
                tracing::debug!(?button, "double-click");
                return ClickKind::Double;
            }
        }
        self.last_click[slot] = Some(now);
        ClickKind::Single
    }

    /// Mark the current tick's click as consumed by a specific handler.
    pub fn claim(&mut self) {
        self.claimed = true;
    }

    /// Whether a handler earlier in this tick claimed the click.
    #[inline]
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Start a new tick: clears the claim flag.
    pub fn begin_tick(&mut self) {
        self.claimed = false;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
