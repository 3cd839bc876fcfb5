#![forbid(unsafe_code)]

//! Easing curves, eased progress driving, and fade-window mapping.
//!
//! Everything here is pure arithmetic over normalized progress. A [`Tween`]
//! accumulates elapsed time and exposes eased progress in [0, 1]; a
//! [`FadeWindow`] remaps overall transition progress into a fade fraction
//! that is pinned outside a configured sub-window. Which curve applies where
//! is configuration ([`Easing`]), not hard-wired per call site.
//!
//! # Invariants
//!
//! 1. Every easing function maps 0.0 → 0.0 and 1.0 → 1.0 and is monotonic
//!    on [0, 1].
//! 2. `Tween::progress()` and `Tween::eased()` are clamped to [0.0, 1.0].
//! 3. `FadeWindow::fraction(t)` is 0.0 for `t <= start`, 1.0 for
//!    `t >= end`, and monotonic in between.
//!
//! # Failure Modes
//!
//! - Zero tween duration: clamped to 1ns so progress math never divides by
//!   zero (the tween completes on the first tick).
//! - Degenerate fade window (`end <= start`): treated as a step at `start`.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing curves
// ---------------------------------------------------------------------------

/// An easing function over normalized progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}

/// Hermite smoothstep: `t^2 (3 - 2t)`.
#[inline]
#[must_use]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Quartic ease-out: `1 - (1-t)^4`. Fast start, soft landing.
#[inline]
#[must_use]
pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

/// Cubic ease-in-out: slow at both ends, fast through the middle.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Named curve selection, so call sites take configuration rather than a
/// function pointer baked in at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    Smoothstep,
    EaseOutQuart,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Resolve to the underlying function.
    #[inline]
    #[must_use]
    pub fn as_fn(self) -> EasingFn {
        match self {
            Easing::Linear => linear,
            Easing::Smoothstep => smoothstep,
            Easing::EaseOutQuart => ease_out_quart,
            Easing::EaseInOutCubic => ease_in_out_cubic,
        }
    }

    /// Apply the curve to a progress value.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        (self.as_fn())(t)
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Accumulates elapsed time against a fixed duration and produces eased
/// progress.
///
/// One resumption per tick: `advance(dt)` adds to elapsed, then
/// `t = clamp(elapsed / duration, 0, 1)` is run through the configured
/// easing. The raw (linear) progress stays available for window mapping.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween over `duration` with the given easing.
    ///
    /// A zero duration is clamped to 1ns.
    #[must_use]
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing,
        }
    }

    /// Advance by `dt` and return the new eased progress.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.eased()
    }

    /// Raw linear progress in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Eased progress in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    /// Whether elapsed time has reached the duration.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ---------------------------------------------------------------------------
// Fade window
// ---------------------------------------------------------------------------

/// Maps overall transition progress into a fade fraction confined to a
/// sub-window `[start, end]` of the transition.
///
/// Outside the window the fraction is pinned: 0.0 before `start`, 1.0 after
/// `end`. Inside, `(t - start) / (end - start)` is run through `curve`.
/// Direction (fading in vs out) is the caller's concern — invert the
/// fraction for a fade-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeWindow {
    /// Overall progress at which the fade begins.
    pub start: f32,
    /// Overall progress at which the fade is complete.
    pub end: f32,
    /// Curve applied to the in-window fraction.
    pub curve: Easing,
}

impl FadeWindow {
    /// Create a window with the given bounds and curve.
    #[must_use]
    pub const fn new(start: f32, end: f32, curve: Easing) -> Self {
        Self { start, end, curve }
    }

    /// Fade fraction for overall progress `t`.
    #[must_use]
    pub fn fraction(&self, t: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            // Degenerate window: step at `start`.
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        let local = ((t - self.start) / span).clamp(0.0, 1.0);
        self.curve.apply(local)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
