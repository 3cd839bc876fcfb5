#![forbid(unsafe_code)]

//! Interaction adapters that feed the transition engine.
//!
//! These are the thin collaborators sitting between external systems and
//! [`TransitionEngine`]: a [`Hotspot`] turns a double-click inside the
//! active panel into a zoom, and a [`Receiver`] turns a successful item
//! placement into a zoom. Neither owns any engine state; both borrow the
//! engine and scene per call.
//!
//! Hit-testing (deciding which hotspot sits under a click) is the caller's
//! concern; an adapter here is only invoked once the caller has resolved
//! the click to it.

use std::time::{Duration, Instant};

use crate::engine::TransitionEngine;
use crate::gesture::GestureDetector;
use crate::scene::{PanelId, Scene};

// ---------------------------------------------------------------------------
// Hotspot
// ---------------------------------------------------------------------------

/// A clickable region inside a panel that drills into a target panel on
/// double-click.
///
/// Tracks its own click timing (a hotspot's window may differ from the
/// global detector's) and claims the shared detector when it consumes a
/// click, so the generic manual-zoom handler skips that tick.
#[derive(Debug)]
pub struct Hotspot {
    /// Panel this hotspot lives in; clicks are ignored unless it is current.
    pub panel: PanelId,
    /// Panel to zoom into.
    pub target: PanelId,
    /// Double-click window for this hotspot (default: 350ms).
    pub window: Duration,
    /// Zoom transition duration (default: 1s).
    pub duration: Duration,
    last_click: Option<Instant>,
}

impl Hotspot {
    /// Create a hotspot with the default window and duration.
    #[must_use]
    pub fn new(panel: PanelId, target: PanelId) -> Self {
        Self {
            panel,
            target,
            window: Duration::from_millis(350),
            duration: Duration::from_secs(1),
            last_click: None,
        }
    }

    /// Handle a pointer-down already hit-tested to this hotspot.
    ///
    /// Returns whether a zoom transition was started. A recognized
    /// double-click claims the shared detector even if the engine rejects
    /// the zoom, so the click cannot fall through to manual zoom.
    pub fn on_pointer_down(
        &mut self,
        engine: &mut TransitionEngine,
        scene: &mut Scene,
        gestures: &mut GestureDetector,
        now: Instant,
    ) -> bool {
        if engine.current_panel() != self.panel {
            return false;
        }

        let double = match self.last_click {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                !elapsed.is_zero() && elapsed <= self.window
            }
            None => false,
        };
        self.last_click = Some(now);
        if !double {
            return false;
        }
        self.last_click = None;

        gestures.claim();
        tracing::debug!(target = self.target.index(), "hotspot double-click");
        engine.zoom_to_panel(scene, self.target, self.duration)
    }
}

// ---------------------------------------------------------------------------
// Receiver
// ---------------------------------------------------------------------------

/// A slot that accepts one item id and drills into a follow-up panel when
/// the right item is placed.
#[derive(Debug, Clone)]
pub struct Receiver {
    /// Required item id; an empty string accepts anything.
    pub accepts_item: String,
    /// Panel to zoom into after a successful placement, if any.
    pub next_panel: Option<PanelId>,
    /// Zoom transition duration (default: 1s).
    pub duration: Duration,
}

impl Receiver {
    /// Create a receiver for a specific item id.
    #[must_use]
    pub fn new(accepts_item: impl Into<String>, next_panel: Option<PanelId>) -> Self {
        Self {
            accepts_item: accepts_item.into(),
            next_panel,
            duration: Duration::from_secs(1),
        }
    }

    /// Attempt to place `item_id` here.
    ///
    /// Returns whether the placement was accepted. A matching placement with
    /// a follow-up panel triggers the zoom; the placement still counts if
    /// the engine is busy (the item stays placed, only the zoom is dropped).
    pub fn try_place(
        &self,
        item_id: &str,
        engine: &mut TransitionEngine,
        scene: &mut Scene,
    ) -> bool {
        if !self.accepts_item.is_empty() && item_id != self.accepts_item {
            return false;
        }
        if let Some(next) = self.next_panel {
            tracing::debug!(item = item_id, next = next.index(), "item placed, zooming");
            engine.zoom_to_panel(scene, next, self.duration);
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
