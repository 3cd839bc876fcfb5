#![forbid(unsafe_code)]

//! Panel scene graph: an arena of nodes addressed by stable handles.
//!
//! A panel is one visual node in the navigable hierarchy. Panels live in
//! a [`Scene`] arena and reference each other through [`PanelId`] handles
//! rather than owning pointers, so reparenting is a field update and world
//! transforms are computed on demand by walking parent edges.
//!
//! # Invariants
//!
//! 1. A panel's original transform is captured at most once; later captures
//!    are no-ops.
//! 2. [`Scene::promote`] and [`Scene::restore`] are inverses over the cached
//!    original: promote then restore returns the panel to its original
//!    parent, local position, and local scale exactly.
//! 3. `PanelId`s handed out by a scene stay valid for the scene's lifetime
//!    (panels are never removed).
//! 4. Parent edges never form a cycle: a child can only be attached to a
//!    panel that already exists, and restore only reinstates a previously
//!    valid edge.
//!
//! # Failure Modes
//!
//! - `restore` on a panel that never captured originals is a no-op returning
//!   `false` (nothing to restore to).
//! - A panel with zero-area base size has no resolvable visible bounds;
//!   [`Scene::visible_bounds`] returns `None` and zoom targets like this are
//!   rejected upstream.

use crate::geometry::{Bounds, Vec2};

// ---------------------------------------------------------------------------
// Handles and node data
// ---------------------------------------------------------------------------

/// Stable handle to a panel inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(u32);

impl PanelId {
    /// Arena slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a panel is currently attached to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Normal tree edge to a parent panel.
    Attached,
    /// Detached and normalized to fill the view (the current full-screen
    /// panel). The cached parent edge stays valid for back-out.
    PromotedRoot,
}

/// How a panel's renderer consumes the fade scalar.
///
/// Resolved once at construction; the engine writes one `fade` value either
/// way and the renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeStyle {
    /// Plain alpha blending on the sprite color.
    #[default]
    Alpha,
    /// Radial reveal from the sprite center (material capability).
    Radial,
}

/// Transform snapshot taken on first activation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OriginalTransform {
    parent: Option<PanelId>,
    local_pos: Vec2,
    local_scale: Vec2,
}

/// One visual panel in the hierarchy.
#[derive(Debug, Clone)]
struct Panel {
    parent: Option<PanelId>,
    local_pos: Vec2,
    local_scale: Vec2,
    /// Unscaled sprite extent in world units. Zero area means the panel has
    /// no resolvable bounds and cannot be a zoom target.
    base_size: Vec2,
    attachment: Attachment,
    active: bool,
    fade: f32,
    fade_style: FadeStyle,
    original: Option<OriginalTransform>,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Arena of panels plus the tree structure between them.
#[derive(Debug, Default)]
pub struct Scene {
    panels: Vec<Panel>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { panels: Vec::new() }
    }

    /// Add a root-level panel (no parent) centered at the origin.
    pub fn add_root(&mut self, base_size: Vec2) -> PanelId {
        self.push(None, Vec2::ZERO, Vec2::ONE, base_size, FadeStyle::default())
    }

    /// Add a child panel attached to `parent` at the given local transform.
    pub fn add_child(
        &mut self,
        parent: PanelId,
        local_pos: Vec2,
        local_scale: Vec2,
        base_size: Vec2,
    ) -> PanelId {
        debug_assert!(parent.index() < self.panels.len());
        self.push(
            Some(parent),
            local_pos,
            local_scale,
            base_size,
            FadeStyle::default(),
        )
    }

    /// Set how a panel's renderer consumes the fade scalar.
    pub fn set_fade_style(&mut self, id: PanelId, style: FadeStyle) {
        self.panels[id.index()].fade_style = style;
    }

    fn push(
        &mut self,
        parent: Option<PanelId>,
        local_pos: Vec2,
        local_scale: Vec2,
        base_size: Vec2,
        fade_style: FadeStyle,
    ) -> PanelId {
        let id = PanelId(self.panels.len() as u32);
        self.panels.push(Panel {
            parent,
            local_pos,
            local_scale,
            base_size,
            attachment: Attachment::Attached,
            active: true,
            fade: 1.0,
            fade_style,
            original: None,
        });
        id
    }

    /// Number of panels in the scene.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the scene has no panels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Transform cache and attachment
// ---------------------------------------------------------------------------

impl Scene {
    /// Record the panel's current parent, local position, and local scale.
    ///
    /// Idempotent: if originals were already captured, this is a no-op.
    pub fn capture_original(&mut self, id: PanelId) {
        let panel = &mut self.panels[id.index()];
        if panel.original.is_some() {
            return;
        }
        panel.original = Some(OriginalTransform {
            parent: panel.parent,
            local_pos: panel.local_pos,
            local_scale: panel.local_scale,
        });
        tracing::debug!(panel = id.index(), "captured original transform");
    }

    /// Detach the panel and normalize it to fill the view: parent cleared,
    /// local scale to unit, local position to origin.
    ///
    /// Captures originals first if not already captured, so the panel can
    /// always be restored.
    pub fn promote(&mut self, id: PanelId) {
        self.capture_original(id);
        let panel = &mut self.panels[id.index()];
        panel.parent = None;
        panel.local_pos = Vec2::ZERO;
        panel.local_scale = Vec2::ONE;
        panel.attachment = Attachment::PromotedRoot;
        tracing::debug!(panel = id.index(), "promoted to root");
    }

    /// Reattach the panel to its cached parent at the cached local transform.
    ///
    /// Returns `false` (no-op) if originals were never captured.
    pub fn restore(&mut self, id: PanelId) -> bool {
        let panel = &mut self.panels[id.index()];
        let Some(original) = panel.original else {
            return false;
        };
        panel.parent = original.parent;
        panel.local_pos = original.local_pos;
        panel.local_scale = original.local_scale;
        panel.attachment = Attachment::Attached;
        tracing::debug!(panel = id.index(), "restored original transform");
        true
    }

    /// Current parent edge.
    ///
    /// For a promoted panel this is `None`; use [`Scene::stored_parent`] to
    /// follow the logical edge that back-out navigates.
    #[inline]
    #[must_use]
    pub fn parent(&self, id: PanelId) -> Option<PanelId> {
        self.panels[id.index()].parent
    }

    /// The logical parent edge: the live edge if attached, the cached one if
    /// promoted.
    #[must_use]
    pub fn stored_parent(&self, id: PanelId) -> Option<PanelId> {
        let panel = &self.panels[id.index()];
        match panel.attachment {
            Attachment::Attached => panel.parent,
            Attachment::PromotedRoot => panel.original.and_then(|o| o.parent),
        }
    }

    /// Current attachment mode.
    #[inline]
    #[must_use]
    pub fn attachment(&self, id: PanelId) -> Attachment {
        self.panels[id.index()].attachment
    }
}

// ---------------------------------------------------------------------------
// World-space queries
// ---------------------------------------------------------------------------

impl Scene {
    /// World position and world scale, accumulated along parent edges.
    #[must_use]
    pub fn world_transform(&self, id: PanelId) -> (Vec2, Vec2) {
        let panel = &self.panels[id.index()];
        match panel.parent {
            None => (panel.local_pos, panel.local_scale),
            Some(parent) => {
                let (ppos, pscale) = self.world_transform(parent);
                (
                    ppos + panel.local_pos.mul(pscale),
                    pscale.mul(panel.local_scale),
                )
            }
        }
    }

    /// World-space visible bounds, or `None` when the base size has zero
    /// area.
    #[must_use]
    pub fn visible_bounds(&self, id: PanelId) -> Option<Bounds> {
        let panel = &self.panels[id.index()];
        let (pos, scale) = self.world_transform(id);
        let bounds = Bounds::new(pos, panel.base_size.mul(scale));
        if bounds.is_empty() { None } else { Some(bounds) }
    }

    /// The orthographic camera size that exactly frames this panel, or
    /// `None` when bounds are unresolvable.
    #[must_use]
    pub fn visible_half_height(&self, id: PanelId) -> Option<f32> {
        self.visible_bounds(id).map(|b| b.half_height())
    }
}

// ---------------------------------------------------------------------------
// Activation and per-panel effect state
// ---------------------------------------------------------------------------

impl Scene {
    /// Activate or deactivate a panel and every panel reachable from it by
    /// child edges. Inactive panels neither render nor receive input.
    pub fn set_subtree_active(&mut self, id: PanelId, active: bool) {
        for i in 0..self.panels.len() {
            let candidate = PanelId(i as u32);
            if self.is_descendant_or_self(candidate, id) {
                self.panels[i].active = active;
            }
        }
    }

    fn is_descendant_or_self(&self, node: PanelId, ancestor: PanelId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.panels[id.index()].parent;
        }
        false
    }

    /// Whether the panel is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self, id: PanelId) -> bool {
        self.panels[id.index()].active
    }

    /// Current fade scalar (0.0 = invisible, 1.0 = fully resolved).
    #[inline]
    #[must_use]
    pub fn fade(&self, id: PanelId) -> f32 {
        self.panels[id.index()].fade
    }

    /// Write the fade scalar, clamped to [0.0, 1.0].
    pub fn set_fade(&mut self, id: PanelId, fade: f32) {
        self.panels[id.index()].fade = fade.clamp(0.0, 1.0);
    }

    /// How the renderer consumes the fade scalar for this panel.
    #[inline]
    #[must_use]
    pub fn fade_style(&self, id: PanelId) -> FadeStyle {
        self.panels[id.index()].fade_style
    }

    /// Current local position.
    #[inline]
    #[must_use]
    pub fn local_pos(&self, id: PanelId) -> Vec2 {
        self.panels[id.index()].local_pos
    }

    /// Current local scale.
    #[inline]
    #[must_use]
    pub fn local_scale(&self, id: PanelId) -> Vec2 {
        self.panels[id.index()].local_scale
    }

    /// Overwrite the local scale (used by the landing bounce).
    pub fn set_local_scale(&mut self, id: PanelId, scale: Vec2) {
        self.panels[id.index()].local_scale = scale;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_scene() -> (Scene, PanelId, PanelId) {
        let mut scene = Scene::new();
        let root = scene.add_root(Vec2::new(2000.0, 1414.0));
        let child = scene.add_child(
            root,
            Vec2::new(300.0, 120.0),
            Vec2::splat(0.1),
            Vec2::new(2000.0, 1414.0),
        );
        (scene, root, child)
    }

    #[test]
    fn capture_is_idempotent() {
        let (mut scene, _root, child) = two_level_scene();
        scene.capture_original(child);
        let first = scene.panels[child.index()].original;

        // Mutate, then capture again: snapshot must not change.
        scene.set_local_scale(child, Vec2::splat(9.0));
        scene.capture_original(child);
        assert_eq!(scene.panels[child.index()].original, first);
    }

    #[test]
    fn promote_normalizes_transform() {
        let (mut scene, _root, child) = two_level_scene();
        scene.promote(child);

        assert_eq!(scene.parent(child), None);
        assert_eq!(scene.local_pos(child), Vec2::ZERO);
        assert_eq!(scene.local_scale(child), Vec2::ONE);
        assert_eq!(scene.attachment(child), Attachment::PromotedRoot);
    }

    #[test]
    fn promote_then_restore_round_trips() {
        let (mut scene, root, child) = two_level_scene();
        let pos = scene.local_pos(child);
        let scale = scene.local_scale(child);

        scene.promote(child);
        assert!(scene.restore(child));

        assert_eq!(scene.parent(child), Some(root));
        assert_eq!(scene.local_pos(child), pos);
        assert_eq!(scene.local_scale(child), scale);
        assert_eq!(scene.attachment(child), Attachment::Attached);
    }

    #[test]
    fn restore_without_capture_is_noop() {
        let (mut scene, _root, child) = two_level_scene();
        assert!(!scene.restore(child));
        assert_eq!(scene.local_scale(child), Vec2::splat(0.1));
    }

    #[test]
    fn stored_parent_survives_promotion() {
        let (mut scene, root, child) = two_level_scene();
        assert_eq!(scene.stored_parent(child), Some(root));
        scene.promote(child);
        assert_eq!(scene.parent(child), None);
        assert_eq!(scene.stored_parent(child), Some(root));
    }

    #[test]
    fn world_transform_accumulates() {
        let (scene, _root, child) = two_level_scene();
        let (pos, scale) = scene.world_transform(child);
        assert_eq!(pos, Vec2::new(300.0, 120.0));
        assert_eq!(scale, Vec2::splat(0.1));
    }

    #[test]
    fn world_transform_nested_scales_compose() {
        let mut scene = Scene::new();
        let root = scene.add_root(Vec2::new(100.0, 100.0));
        let mid = scene.add_child(
            root,
            Vec2::new(10.0, 0.0),
            Vec2::splat(0.5),
            Vec2::new(100.0, 100.0),
        );
        let leaf = scene.add_child(
            mid,
            Vec2::new(10.0, 0.0),
            Vec2::splat(0.5),
            Vec2::new(100.0, 100.0),
        );

        let (pos, scale) = scene.world_transform(leaf);
        // leaf world pos = mid pos + mid scale * leaf local = 10 + 0.5*10
        assert_eq!(pos, Vec2::new(15.0, 0.0));
        assert_eq!(scale, Vec2::splat(0.25));
    }

    #[test]
    fn visible_half_height_scales_with_ancestors() {
        let (scene, root, child) = two_level_scene();
        assert_eq!(scene.visible_half_height(root), Some(707.0));
        // Child is at 0.1 scale inside the root.
        let hh = scene.visible_half_height(child).unwrap();
        assert!((hh - 70.7).abs() < 0.001);
    }

    #[test]
    fn zero_area_bounds_unresolvable() {
        let mut scene = Scene::new();
        let flat = scene.add_root(Vec2::new(100.0, 0.0));
        assert!(scene.visible_bounds(flat).is_none());
        assert!(scene.visible_half_height(flat).is_none());
    }

    #[test]
    fn subtree_activation_covers_descendants() {
        let mut scene = Scene::new();
        let root = scene.add_root(Vec2::splat(100.0));
        let a = scene.add_child(root, Vec2::ZERO, Vec2::ONE, Vec2::splat(100.0));
        let b = scene.add_child(a, Vec2::ZERO, Vec2::ONE, Vec2::splat(100.0));
        let other = scene.add_child(root, Vec2::ZERO, Vec2::ONE, Vec2::splat(100.0));

        scene.set_subtree_active(a, false);
        assert!(scene.is_active(root));
        assert!(!scene.is_active(a));
        assert!(!scene.is_active(b));
        assert!(scene.is_active(other));

        scene.set_subtree_active(a, true);
        assert!(scene.is_active(a));
        assert!(scene.is_active(b));
    }

    #[test]
    fn promoted_panel_leaves_old_subtree() {
        // After promotion the panel is its own root; deactivating the former
        // parent must not touch it.
        let (mut scene, root, child) = two_level_scene();
        scene.promote(child);
        scene.set_subtree_active(root, false);
        assert!(!scene.is_active(root));
        assert!(scene.is_active(child));
    }

    #[test]
    fn fade_clamped() {
        let (mut scene, root, _child) = two_level_scene();
        scene.set_fade(root, 1.5);
        assert_eq!(scene.fade(root), 1.0);
        scene.set_fade(root, -0.5);
        assert_eq!(scene.fade(root), 0.0);
    }

    #[test]
    fn fade_style_resolved_once() {
        let (mut scene, _root, child) = two_level_scene();
        assert_eq!(scene.fade_style(child), FadeStyle::Alpha);
        scene.set_fade_style(child, FadeStyle::Radial);
        assert_eq!(scene.fade_style(child), FadeStyle::Radial);
    }
}
