#![forbid(unsafe_code)]

//! Core: nested-panel zoom navigation.
//!
//! # Role in Diorama
//! `diorama-core` is the navigation engine for a tree of visual panels: a
//! drill-in gesture zooms the camera into a child panel until it fills the
//! view (promoting it to root and hiding its former parent), and a back-out
//! gesture reverses the process.
//!
//! # Primary responsibilities
//! - **Scene**: arena-based panel hierarchy with cached original transforms
//!   and promote/restore semantics.
//! - **GestureDetector**: per-button double-click debouncing with a
//!   same-tick claim mechanism.
//! - **TransitionEngine**: the camera transition state machine (zoom-in,
//!   zoom-out, manual zoom, landing bounce), advanced once per tick.
//! - **Animation primitives**: easing curves, eased progress tweens, and
//!   fade-window mapping.
//!
//! # How it fits in the system
//! A host application owns a [`Scene`], one [`TransitionEngine`], and one
//! [`GestureDetector`] per session, calls `begin_tick` + `tick` every frame,
//! and routes hit-tested pointer input through the engine or through
//! [`interact`] adapters. Rendering and audio observe the engine's read-only
//! state (`current_panel`, `is_transitioning`, per-panel fade) but never
//! mutate it.

pub mod animation;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod interact;
pub mod scene;

pub use animation::{Easing, FadeWindow, Tween};
pub use engine::{CameraState, EngineConfig, TransitionEngine};
pub use geometry::{Bounds, Vec2};
pub use gesture::{ClickKind, GestureConfig, GestureDetector, PointerButton};
pub use interact::{Hotspot, Receiver};
pub use scene::{Attachment, FadeStyle, PanelId, Scene};
