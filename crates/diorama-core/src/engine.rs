#![forbid(unsafe_code)]

//! The camera transition state machine.
//!
//! [`TransitionEngine`] owns the orthographic camera and the notion of the
//! current panel, and drives every timed transition between panels or zoom
//! levels: zoom-in (drill into a child panel), zoom-out (back out to the
//! parent), free manual zoom, and the landing bounce chained after a
//! zoom-in. It is advanced cooperatively by an external per-frame
//! [`tick`](TransitionEngine::tick); there are no threads and no locks.
//!
//! One engine exists per session, constructed explicitly by the composing
//! root and passed by reference to collaborators. The scene graph is not
//! owned: every operation that touches panels borrows the [`Scene`].
//!
//! # State Machine
//!
//! States: `Idle`, `ZoomingIn`, `ZoomingOut`, `ManualZooming`, `Bouncing`.
//! At most one non-idle state is active; a request arriving while non-idle
//! is rejected (`false`) with zero side effects. There is no queue, no
//! retry, and no cancellation — a started transition always runs to
//! completion.
//!
//! # Invariants
//!
//! 1. Exactly one panel is current at all times; it only changes inside a
//!    completion handler.
//! 2. Camera, fade, scale, and graph mutation during a transition happens
//!    only inside [`tick`](TransitionEngine::tick); the non-idle state acts
//!    as the re-entrancy guard.
//! 3. A rejected request is indistinguishable from "nothing happened".
//! 4. Completion handlers run before the guard is released: the bounce
//!    chains off zoom-in inside the same tick that finished it.
//!
//! # Failure Modes
//!
//! - Zoom target with missing or zero-area bounds: rejected before any
//!   camera or graph mutation (fail closed).
//! - `go_back` at the root: silent no-op.
//! - Manual zoom-in at the size floor: no-op.

use std::time::Duration;

use crate::animation::{Easing, FadeWindow, Tween};
use crate::geometry::{Vec2, lerp};
use crate::gesture::{ClickKind, GestureDetector, PointerButton};
use crate::scene::{PanelId, Scene};

// ---------------------------------------------------------------------------
// Camera and configuration
// ---------------------------------------------------------------------------

/// 2D orthographic camera state. Depth is fixed and implicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// World-space position of the camera center.
    pub position: Vec2,
    /// Orthographic half-height in world units.
    pub size: f32,
}

/// Tunables for every transition the engine drives.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Camera position when no panel is zoomed (default: origin).
    pub baseline_position: Vec2,
    /// Camera size when no panel is zoomed (default: 707.0).
    pub baseline_size: f32,
    /// Curve applied to camera position and size in panel transitions
    /// (default: ease-in-out cubic).
    pub camera_easing: Easing,
    /// Duration of the back-out transition (default: 1.5s).
    pub zoom_out_duration: Duration,
    /// Late window of zoom-in progress during which the target resolves
    /// into view (default: 0.75–0.99, ease-out quart).
    pub zoom_in_fade: FadeWindow,
    /// Early window of zoom-out progress during which the child fades away
    /// (default: 0.00–0.25, ease-out quart).
    pub zoom_out_fade: FadeWindow,
    /// Size multiplier per manual zoom-in step (default: 0.7).
    pub manual_zoom_ratio: f32,
    /// Duration of one manual zoom step (default: 0.3s).
    pub manual_zoom_duration: Duration,
    /// Curve for manual zoom steps (default: ease-out quart).
    pub manual_zoom_easing: Easing,
    /// Smallest orthographic size manual zoom may reach (default: 1.0).
    pub min_manual_zoom: f32,
    /// How far the camera blends toward the cursor on manual zoom-in
    /// (default: 0.3).
    pub cursor_blend: f32,
    /// Whether the landing bounce plays after a zoom-in (default: true).
    pub bounce_enabled: bool,
    /// Scale overshoot of the bounce (default: 0.02 = 2%).
    pub bounce_amount: f32,
    /// Total duration of the bounce, split evenly between overshoot and
    /// settle (default: 0.15s).
    pub bounce_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baseline_position: Vec2::ZERO,
            baseline_size: 707.0,
            camera_easing: Easing::EaseInOutCubic,
            zoom_out_duration: Duration::from_millis(1500),
            zoom_in_fade: FadeWindow::new(0.75, 0.99, Easing::EaseOutQuart),
            zoom_out_fade: FadeWindow::new(0.0, 0.25, Easing::EaseOutQuart),
            manual_zoom_ratio: 0.7,
            manual_zoom_duration: Duration::from_millis(300),
            manual_zoom_easing: Easing::EaseOutQuart,
            min_manual_zoom: 1.0,
            cursor_blend: 0.3,
            bounce_enabled: true,
            bounce_amount: 0.02,
            bounce_duration: Duration::from_millis(150),
        }
    }
}

// ---------------------------------------------------------------------------
// Transition states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BouncePhase {
    /// Scaling up toward the overshoot.
    Overshoot,
    /// Settling back to normal scale.
    Settle,
}

/// Per-state payload: the transient transition request plus the captured
/// interpolation endpoints. Dropped on completion, never persisted.
#[derive(Debug, Clone, Copy)]
enum Transition {
    Idle,
    ZoomingIn {
        target: PanelId,
        from: PanelId,
        tween: Tween,
        start_pos: Vec2,
        start_size: f32,
        end_pos: Vec2,
        end_size: f32,
    },
    ZoomingOut {
        child: PanelId,
        parent: PanelId,
        tween: Tween,
        start_pos: Vec2,
        start_size: f32,
    },
    ManualZooming {
        tween: Tween,
        start_pos: Vec2,
        start_size: f32,
        end_pos: Vec2,
        end_size: f32,
    },
    Bouncing {
        panel: PanelId,
        phase: BouncePhase,
        tween: Tween,
        base_scale: Vec2,
    },
}

// ---------------------------------------------------------------------------
// TransitionEngine
// ---------------------------------------------------------------------------

/// Owns the camera, the current panel, and the transition exclusivity guard.
#[derive(Debug)]
pub struct TransitionEngine {
    config: EngineConfig,
    camera: CameraState,
    current_panel: PanelId,
    state: Transition,
}

impl TransitionEngine {
    /// Create an engine with the camera at the configured baseline and
    /// `initial` as the current panel.
    #[must_use]
    pub fn new(config: EngineConfig, initial: PanelId) -> Self {
        let camera = CameraState {
            position: config.baseline_position,
            size: config.baseline_size,
        };
        Self {
            config,
            camera,
            current_panel: initial,
            state: Transition::Idle,
        }
    }

    /// The panel currently filling (or about to fill) the view.
    #[inline]
    #[must_use]
    pub fn current_panel(&self) -> PanelId {
        self.current_panel
    }

    /// Whether any transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        !matches!(self.state, Transition::Idle)
    }

    /// Current camera state (read-only; mutated only by the engine).
    #[inline]
    #[must_use]
    pub fn camera(&self) -> CameraState {
        self.camera
    }

    /// Engine configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

impl TransitionEngine {
    /// Start zooming the camera into `target` over `duration`.
    ///
    /// Valid only from idle with a target that has resolvable bounds and is
    /// not already current; otherwise rejected without side effects. The
    /// target starts invisible and resolves into view during the configured
    /// late fade window.
    pub fn zoom_to_panel(&mut self, scene: &mut Scene, target: PanelId, duration: Duration) -> bool {
        if self.is_transitioning() {
            tracing::debug!(target = target.index(), "zoom-in rejected: busy");
            return false;
        }
        if target == self.current_panel {
            tracing::debug!(target = target.index(), "zoom-in rejected: already current");
            return false;
        }
        let Some(end_size) = scene.visible_half_height(target) else {
            tracing::debug!(target = target.index(), "zoom-in rejected: no visible bounds");
            return false;
        };
        let (end_pos, _) = scene.world_transform(target);

        scene.set_fade(target, 0.0);
        self.state = Transition::ZoomingIn {
            target,
            from: self.current_panel,
            tween: Tween::new(duration, self.config.camera_easing),
            start_pos: self.camera.position,
            start_size: self.camera.size,
            end_pos,
            end_size,
        };
        tracing::debug!(
            target = target.index(),
            duration_ms = duration.as_millis() as u64,
            "zoom-in started"
        );
        true
    }

    /// Start backing out of the current panel over `duration`.
    ///
    /// Valid only from idle and when the current panel has a stored parent
    /// edge; otherwise a silent no-op. The current panel is restored to its
    /// cached transform immediately, the parent subtree reactivated, and the
    /// camera snaps to frame the now-small child before animating out to the
    /// baseline.
    pub fn go_back(&mut self, scene: &mut Scene, duration: Duration) -> bool {
        if self.is_transitioning() {
            tracing::debug!("back-out rejected: busy");
            return false;
        }
        let child = self.current_panel;
        let Some(parent) = scene.stored_parent(child) else {
            tracing::debug!(panel = child.index(), "back-out rejected: at root");
            return false;
        };

        scene.restore(child);
        scene.set_subtree_active(parent, true);

        let (child_pos, child_scale) = scene.world_transform(child);
        let start_pos = child_pos;
        let start_size = self.config.baseline_size * child_scale.y;
        self.camera = CameraState {
            position: start_pos,
            size: start_size,
        };

        self.state = Transition::ZoomingOut {
            child,
            parent,
            tween: Tween::new(duration, self.config.camera_easing),
            start_pos,
            start_size,
        };
        tracing::debug!(
            child = child.index(),
            parent = parent.index(),
            "back-out started"
        );
        true
    }

    /// Step the camera in toward `cursor_world`, shrinking the size by the
    /// configured ratio.
    ///
    /// Rejected while transitioning or when the camera is already at the
    /// size floor. Never touches the current panel or the scene graph.
    pub fn manual_zoom_in(&mut self, cursor_world: Vec2) -> bool {
        if self.is_transitioning() {
            tracing::debug!("manual zoom-in rejected: busy");
            return false;
        }
        if self.camera.size <= self.config.min_manual_zoom + 0.1 {
            tracing::debug!("manual zoom-in rejected: at floor");
            return false;
        }
        let end_size = (self.camera.size * self.config.manual_zoom_ratio)
            .max(self.config.min_manual_zoom);
        let end_pos = self
            .camera
            .position
            .lerp(cursor_world, self.config.cursor_blend);

        self.state = Transition::ManualZooming {
            tween: Tween::new(self.config.manual_zoom_duration, self.config.manual_zoom_easing),
            start_pos: self.camera.position,
            start_size: self.camera.size,
            end_pos,
            end_size,
        };
        tracing::debug!(end_size, "manual zoom-in started");
        true
    }

    /// Return the camera exactly to the baseline position and size.
    ///
    /// Rejected while transitioning or when already at the baseline.
    pub fn manual_zoom_out(&mut self) -> bool {
        if self.is_transitioning() {
            tracing::debug!("manual zoom-out rejected: busy");
            return false;
        }
        if self.config.baseline_size - self.camera.size <= 0.1 {
            tracing::debug!("manual zoom-out rejected: at baseline");
            return false;
        }

        self.state = Transition::ManualZooming {
            tween: Tween::new(self.config.manual_zoom_duration, self.config.manual_zoom_easing),
            start_pos: self.camera.position,
            start_size: self.camera.size,
            end_pos: self.config.baseline_position,
            end_size: self.config.baseline_size,
        };
        tracing::debug!("manual zoom-out started");
        true
    }

    /// Debounced pointer-down entry point for the two logical buttons.
    ///
    /// Primary double-click steps the manual zoom in toward the cursor
    /// unless a more specific handler claimed the click earlier this tick.
    /// Secondary double-click undoes a manual zoom when one is in effect,
    /// otherwise backs out of the current panel. Ignored entirely while a
    /// transition is in flight.
    ///
    /// Returns whether a transition was started.
    pub fn handle_pointer_down(
        &mut self,
        scene: &mut Scene,
        gestures: &mut GestureDetector,
        button: PointerButton,
        cursor_world: Vec2,
        now: std::time::Instant,
    ) -> bool {
        if self.is_transitioning() {
            return false;
        }
        if gestures.register_click(button, now) != ClickKind::Double {
            return false;
        }
        match button {
            PointerButton::Primary => {
                if gestures.is_claimed() {
                    false
                } else {
                    self.manual_zoom_in(cursor_world)
                }
            }
            PointerButton::Secondary => {
                if self.camera.size < self.config.baseline_size - 0.1 {
                    self.manual_zoom_out()
                } else {
                    self.go_back(scene, self.config.zoom_out_duration)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tick advancement
// ---------------------------------------------------------------------------

impl TransitionEngine {
    /// Advance the in-flight transition by `dt`.
    ///
    /// One resumption per rendering tick. All interpolated writes (camera,
    /// fade, bounce scale) and all completion side effects happen here; the
    /// exclusivity guard is released only after the completion handler runs.
    pub fn tick(&mut self, scene: &mut Scene, dt: Duration) {
        match self.state {
            Transition::Idle => {}

            Transition::ZoomingIn {
                target,
                from,
                mut tween,
                start_pos,
                start_size,
                end_pos,
                end_size,
            } => {
                let eased = tween.advance(dt);
                self.camera.position = start_pos.lerp(end_pos, eased);
                self.camera.size = lerp(start_size, end_size, eased);
                scene.set_fade(target, self.config.zoom_in_fade.fraction(tween.progress()));

                if tween.is_complete() {
                    self.finish_zoom_in(scene, target, from);
                } else {
                    self.state = Transition::ZoomingIn {
                        target,
                        from,
                        tween,
                        start_pos,
                        start_size,
                        end_pos,
                        end_size,
                    };
                }
            }

            Transition::ZoomingOut {
                child,
                parent,
                mut tween,
                start_pos,
                start_size,
            } => {
                let eased = tween.advance(dt);
                self.camera.position = start_pos.lerp(self.config.baseline_position, eased);
                self.camera.size = lerp(start_size, self.config.baseline_size, eased);
                let fade = 1.0 - self.config.zoom_out_fade.fraction(tween.progress());
                scene.set_fade(child, fade);

                if tween.is_complete() {
                    self.camera = CameraState {
                        position: self.config.baseline_position,
                        size: self.config.baseline_size,
                    };
                    scene.set_fade(child, 0.0);
                    self.current_panel = parent;
                    self.state = Transition::Idle;
                    tracing::debug!(current = parent.index(), "back-out complete");
                } else {
                    self.state = Transition::ZoomingOut {
                        child,
                        parent,
                        tween,
                        start_pos,
                        start_size,
                    };
                }
            }

            Transition::ManualZooming {
                mut tween,
                start_pos,
                start_size,
                end_pos,
                end_size,
            } => {
                let eased = tween.advance(dt);
                self.camera.position = start_pos.lerp(end_pos, eased);
                self.camera.size = lerp(start_size, end_size, eased);

                if tween.is_complete() {
                    self.camera = CameraState {
                        position: end_pos,
                        size: end_size,
                    };
                    self.state = Transition::Idle;
                } else {
                    self.state = Transition::ManualZooming {
                        tween,
                        start_pos,
                        start_size,
                        end_pos,
                        end_size,
                    };
                }
            }

            Transition::Bouncing {
                panel,
                phase,
                mut tween,
                base_scale,
            } => {
                let eased = tween.advance(dt);
                let peak = base_scale.scale(1.0 + self.config.bounce_amount);
                match phase {
                    BouncePhase::Overshoot => {
                        scene.set_local_scale(panel, base_scale.lerp(peak, eased));
                        if tween.is_complete() {
                            self.state = Transition::Bouncing {
                                panel,
                                phase: BouncePhase::Settle,
                                tween: Tween::new(
                                    self.half_bounce(),
                                    Easing::EaseInOutCubic,
                                ),
                                base_scale,
                            };
                        } else {
                            self.state = Transition::Bouncing {
                                panel,
                                phase,
                                tween,
                                base_scale,
                            };
                        }
                    }
                    BouncePhase::Settle => {
                        scene.set_local_scale(panel, peak.lerp(base_scale, eased));
                        if tween.is_complete() {
                            scene.set_local_scale(panel, base_scale);
                            self.state = Transition::Idle;
                        } else {
                            self.state = Transition::Bouncing {
                                panel,
                                phase,
                                tween,
                                base_scale,
                            };
                        }
                    }
                }
            }
        }
    }

    /// Zoom-in completion: promote the target, hide the old subtree, reset
    /// the camera to the baseline, and chain the bounce if enabled.
    fn finish_zoom_in(&mut self, scene: &mut Scene, target: PanelId, from: PanelId) {
        scene.set_fade(target, 1.0);
        scene.promote(target);
        scene.set_subtree_active(from, false);
        self.camera = CameraState {
            position: self.config.baseline_position,
            size: self.config.baseline_size,
        };
        self.current_panel = target;
        tracing::debug!(current = target.index(), "zoom-in complete");

        if self.config.bounce_enabled {
            self.state = Transition::Bouncing {
                panel: target,
                phase: BouncePhase::Overshoot,
                tween: Tween::new(self.half_bounce(), Easing::EaseOutQuart),
                base_scale: scene.local_scale(target),
            };
        } else {
            self.state = Transition::Idle;
        }
    }

    fn half_bounce(&self) -> Duration {
        self.config.bounce_duration / 2
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
