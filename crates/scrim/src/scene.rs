//! The host scene-graph capability surface.
//!
//! The overlay never owns scene nodes. The host exposes them through the
//! [`SceneNode`] trait for the duration of a frame callback, and the overlay
//! remembers nodes across frames only by their [`NodeId`]: a lookup-only
//! relation that never extends a node's lifetime.

use std::collections::BTreeMap;

use crate::geometry::{Rect, WorldTransform};

/// Stable identity for a scene-graph node, minted by the host.
///
/// IDs must be unique within a scene and stable for a node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Accessibility metadata a node declares for its proxy.
///
/// Construct one record per node; the defaults here are the complete set of
/// fields the overlay reads, so hosts never share a metadata record between
/// nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessMeta {
    /// Read-aloud text, mirrored to the proxy's `aria-label`.
    pub hint: Option<String>,

    /// Free-form attribute mapping applied verbatim to the proxy element.
    ///
    /// A `title` entry doubles as the `aria-label` fallback when no `hint`
    /// is set.
    pub attributes: BTreeMap<String, String>,

    /// Suppress per-frame geometry re-sync after the first placement.
    ///
    /// Useful for continuously animating nodes whose proxy would otherwise
    /// be repositioned every frame.
    pub render_once: bool,

    /// Desired assistive-technology traversal position.
    ///
    /// Declared tab-order hint; the reconciler currently orders proxies by
    /// discovery order and does not consume this field.
    pub render_index: i32,
}

impl AccessMeta {
    /// Create metadata with only a hint set.
    pub fn with_hint(hint: impl Into<String>) -> Self {
        Self {
            hint: Some(hint.into()),
            ..Default::default()
        }
    }
}

/// Capability trait the host implements on its scene-graph nodes.
///
/// The overlay only ever borrows nodes inside a single frame callback, so
/// implementations are free to hand out views into transient frame state.
///
/// # Example
///
/// ```ignore
/// impl SceneNode for Sprite {
///     fn node_id(&self) -> NodeId {
///         NodeId(self.id)
///     }
///
///     fn accessibility(&self) -> Option<&AccessMeta> {
///         self.access_meta.as_ref()
///     }
///
///     // visibility, children, transform, bounds...
/// }
/// ```
pub trait SceneNode {
    /// Host-stable identity for this node.
    fn node_id(&self) -> NodeId;

    /// Whether the node is visible. Hidden subtrees are skipped entirely.
    fn is_visible(&self) -> bool;

    /// Whether the node is renderable this frame.
    fn is_renderable(&self) -> bool;

    /// Whether the node participates in input interaction.
    ///
    /// Interactive nodes get button-like proxies, everything else a static
    /// text region.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Children in their defined sibling order.
    fn children(&self) -> Vec<&dyn SceneNode>;

    /// Translation and axis-scale components of the world transform.
    fn world_transform(&self) -> WorldTransform;

    /// World-space bounding box of the node's rendered content.
    fn bounds(&self) -> Rect;

    /// Explicit hit-area rectangle in local space, if the node declares one.
    fn hit_area(&self) -> Option<Rect> {
        None
    }

    /// Accessibility metadata, or `None` for nodes that are not accessible.
    fn accessibility(&self) -> Option<&AccessMeta> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_defaults_are_inert() {
        let meta = AccessMeta::default();
        assert!(meta.hint.is_none());
        assert!(meta.attributes.is_empty());
        assert!(!meta.render_once);
        assert_eq!(meta.render_index, 0);
    }

    #[test]
    fn with_hint_sets_only_the_hint() {
        let meta = AccessMeta::with_hint("an ant");
        assert_eq!(meta.hint.as_deref(), Some("an ant"));
        assert!(meta.attributes.is_empty());
    }
}
