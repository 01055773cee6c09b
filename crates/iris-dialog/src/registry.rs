//! Registry of live dialogs with layer assignment.
//!
//! The `Registry` keeps every live dialog (shown or minimized) in creation
//! order and hands out the layer each one is drawn at.
//!
//! # Invariants
//!
//! - Layers are strictly increasing along the registry order, so no two live
//!   dialogs share a layer.
//! - A new dialog gets `base + 10 * count`; if an out-of-order close left a
//!   live dialog at or above that value, it gets the top layer + 10 instead.
//!   A layer is reused only once the dialog holding it is gone.
//! - The base is clamped to `MIN_BASE_LAYER..=MAX_BASE_LAYER`, so every
//!   layer is at least 1 and its backdrop at `layer - 1` never collides.
//!
//! # Failure Modes
//!
//! - `unregister()` for an id that is not present returns `None` (no panic).
//! - `register()` for an id already present returns its existing layer.
//! - `register()` returns `None` instead of wrapping or saturating when the
//!   next layer would overflow; [`Registry::compact`] renumbers the live
//!   dialogs from the base to make room.
//!
//! # Example
//!
//! ```
//! use iris_backend::DialogId;
//! use iris_dialog::registry::Registry;
//!
//! let mut registry = Registry::new();
//! let a = DialogId::new(1);
//! let b = DialogId::new(2);
//! assert_eq!(registry.register(a), Some(1050));
//! assert_eq!(registry.register(b), Some(1060));
//! registry.unregister(a);
//! // 1050 + 10 * 1 would collide with b.
//! assert_eq!(registry.register(DialogId::new(3)), Some(1070));
//! ```

use iris_backend::{DialogId, Layer};

/// Layer of the first dialog.
pub const BASE_LAYER: Layer = 1050;

/// Layer increment between dialogs (leaves room for backdrops and host elements).
pub const LAYER_STEP: Layer = 10;

/// Lowest accepted base: the first backdrop sits at `base - 1`.
pub const MIN_BASE_LAYER: Layer = 1;

/// Highest accepted base, leaving half the range for stacking.
pub const MAX_BASE_LAYER: Layer = Layer::MAX / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    id: DialogId,
    layer: Layer,
}

/// Ordered set of live dialogs.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Live dialogs in creation order (bottom to top).
    entries: Vec<Entry>,
    base: Layer,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry starting at [`BASE_LAYER`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(BASE_LAYER)
    }

    /// Create an empty registry whose first dialog sits at `base`, clamped to
    /// [`MIN_BASE_LAYER`]`..=`[`MAX_BASE_LAYER`].
    #[must_use]
    pub fn with_base(base: Layer) -> Self {
        Self {
            entries: Vec::new(),
            base: base.clamp(MIN_BASE_LAYER, MAX_BASE_LAYER),
        }
    }

    /// Layer of the first dialog.
    #[inline]
    #[must_use]
    pub fn base(&self) -> Layer {
        self.base
    }

    /// Append a dialog and return its layer, or `None` when the next layer
    /// would overflow.
    pub fn register(&mut self, id: DialogId) -> Option<Layer> {
        if let Some(layer) = self.layer_of(id) {
            return Some(layer);
        }

        let layer = self.next_layer()?;
        self.entries.push(Entry { id, layer });
        Some(layer)
    }

    fn layer_at(&self, index: usize) -> Option<Layer> {
        let offset = LAYER_STEP.checked_mul(Layer::try_from(index).ok()?)?;
        self.base.checked_add(offset)
    }

    fn next_layer(&self) -> Option<Layer> {
        let by_count = self.layer_at(self.entries.len())?;
        match self.entries.last() {
            Some(top) if top.layer >= by_count => top.layer.checked_add(LAYER_STEP),
            _ => Some(by_count),
        }
    }

    /// Renumber live dialogs to `base + 10 * index`, keeping their order.
    ///
    /// Returns the dialogs whose layer changed, with their new layer.
    pub fn compact(&mut self) -> Vec<(DialogId, Layer)> {
        let mut moved = Vec::new();
        for index in 0..self.entries.len() {
            let Some(layer) = self.layer_at(index) else {
                break;
            };
            let entry = &mut self.entries[index];
            if entry.layer != layer {
                entry.layer = layer;
                moved.push((entry.id, layer));
            }
        }
        moved
    }

    /// Remove a dialog. Returns its layer, or `None` if it was not registered.
    pub fn unregister(&mut self, id: DialogId) -> Option<Layer> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).layer)
    }

    /// Remove everything, returning ids top first.
    pub fn clear(&mut self) -> Vec<DialogId> {
        self.entries.drain(..).rev().map(|e| e.id).collect()
    }

    // --- State Queries ---

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn contains(&self, id: DialogId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    #[must_use]
    pub fn layer_of(&self, id: DialogId) -> Option<Layer> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.layer)
    }

    /// Ids in creation order, bottom first.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = DialogId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    #[cfg(test)]
    pub(crate) fn force_layer(&mut self, id: DialogId, layer: Layer) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.layer = layer;
        }
    }

    /// The highest dialog satisfying `pred`.
    #[must_use]
    pub fn top_where(&self, mut pred: impl FnMut(DialogId) -> bool) -> Option<DialogId> {
        self.entries.iter().rev().map(|e| e.id).find(|&id| pred(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> DialogId {
        DialogId::new(n)
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.top_where(|_| true).is_none());
    }

    #[test]
    fn layers_step_by_ten() {
        let mut registry = Registry::new();
        assert_eq!(registry.register(id(1)), Some(1050));
        assert_eq!(registry.register(id(2)), Some(1060));
        assert_eq!(registry.register(id(3)), Some(1070));
    }

    #[test]
    fn custom_base() {
        let mut registry = Registry::with_base(2000);
        assert_eq!(registry.register(id(1)), Some(2000));
        assert_eq!(registry.register(id(2)), Some(2010));
    }

    #[test]
    fn closing_top_reuses_its_layer() {
        let mut registry = Registry::new();
        registry.register(id(1));
        registry.register(id(2));
        assert_eq!(registry.unregister(id(2)), Some(1060));
        assert_eq!(registry.register(id(3)), Some(1060));
    }

    #[test]
    fn closing_below_top_never_collides() {
        let mut registry = Registry::new();
        registry.register(id(1));
        registry.register(id(2));
        registry.register(id(3));
        registry.unregister(id(1));
        let layer = registry.register(id(4));
        assert_eq!(layer, Some(1080));
        assert_eq!(registry.layer_of(id(3)), Some(1070));
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = Registry::new();
        registry.register(id(1));
        assert_eq!(registry.unregister(id(1)), Some(1050));
        assert_eq!(registry.unregister(id(1)), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn register_twice_keeps_layer() {
        let mut registry = Registry::new();
        registry.register(id(1));
        registry.register(id(2));
        assert_eq!(registry.register(id(1)), Some(1050));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn top_where_skips_filtered() {
        let mut registry = Registry::new();
        registry.register(id(1));
        registry.register(id(2));
        registry.register(id(3));
        assert_eq!(registry.top_where(|d| d != id(3)), Some(id(2)));
    }

    #[test]
    fn clear_returns_top_first() {
        let mut registry = Registry::new();
        registry.register(id(1));
        registry.register(id(2));
        assert_eq!(registry.clear(), vec![id(2), id(1)]);
        assert!(registry.is_empty());
    }

    #[test]
    fn layers_strictly_increasing_after_churn() {
        let mut registry = Registry::new();
        for n in 1..=5 {
            registry.register(id(n));
        }
        registry.unregister(id(2));
        registry.unregister(id(4));
        registry.register(id(6));
        registry.register(id(7));
        let layers: Vec<Layer> = registry.ids().filter_map(|d| registry.layer_of(d)).collect();
        for pair in layers.windows(2) {
            assert!(pair[1] > pair[0], "layers should be strictly increasing: {layers:?}");
        }
    }

    #[test]
    fn base_is_clamped_into_range() {
        assert_eq!(Registry::with_base(0).base(), MIN_BASE_LAYER);
        assert_eq!(Registry::with_base(Layer::MAX - 5).base(), MAX_BASE_LAYER);
        assert_eq!(Registry::with_base(2000).base(), 2000);
    }

    #[test]
    fn high_base_never_duplicates_layers() {
        let mut registry = Registry::with_base(Layer::MAX - 5);
        let layers: Vec<Layer> = (1..=3).filter_map(|n| registry.register(id(n))).collect();
        assert_eq!(layers.len(), 3);
        assert!(layers.windows(2).all(|w| w[0] < w[1]), "{layers:?}");
    }

    #[test]
    fn overflow_is_refused_not_saturated() {
        let mut registry = Registry::with_base(MAX_BASE_LAYER);
        registry.register(id(1));
        registry.register(id(2));
        registry.force_layer(id(2), Layer::MAX - 3);
        assert_eq!(registry.register(id(3)), None);
        assert!(!registry.contains(id(3)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn compact_renumbers_from_base() {
        let mut registry = Registry::new();
        for n in 1..=4 {
            registry.register(id(n));
        }
        registry.unregister(id(1));
        registry.unregister(id(2));
        let moved = registry.compact();
        assert_eq!(moved, vec![(id(3), 1050), (id(4), 1060)]);
        assert_eq!(registry.register(id(5)), Some(1070));
        assert!(registry.compact().is_empty());
    }
}
