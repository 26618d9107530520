//! The DOM backend seam.
//!
//! The overlay never touches the document directly. Everything it needs from
//! the DOM (an overlay container, absolutely positioned proxy elements,
//! attribute writes) goes through the [`DomBackend`] trait, injected at
//! construction. A wasm host backs this with `web-sys`; tests back it with a
//! recording mock.

use crate::error::OverlayResult;
use crate::geometry::Rect;
use crate::scene::SceneNode;

/// Opaque handle to a DOM element, minted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Structural kind of a proxy element, fixed at creation.
///
/// The two kinds are structurally different elements (a focusable control
/// vs. a static text region), so a pooled proxy is only ever reused for a
/// node requesting the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    /// Focusable, clickable control with no default border styling.
    Button,
    /// Static, non-interactive text region.
    Label,
}

impl ProxyKind {
    /// Derive the kind a node's proxy should have.
    pub fn for_node(node: &dyn SceneNode) -> Self {
        if node.is_interactive() {
            Self::Button
        } else {
            Self::Label
        }
    }

    /// Whether proxies of this kind receive activation events.
    #[inline]
    pub fn is_clickable(self) -> bool {
        matches!(self, Self::Button)
    }
}

/// Operations the overlay needs from the document.
///
/// All proxy elements are created absolutely positioned and layered above the
/// canvas; clickable ones are registered for activation events, which the
/// backend routes to [`OverlayManager::notify_activation`].
///
/// [`OverlayManager::notify_activation`]: crate::OverlayManager::notify_activation
pub trait DomBackend {
    /// Insert the overlay container into the document.
    ///
    /// With `custom` set, that element hosts the proxies instead of the
    /// backend's default auto-positioned overlay.
    fn attach_container(&mut self, custom: Option<ElementHandle>) -> OverlayResult<()>;

    /// Remove the overlay container from the document.
    fn detach_container(&mut self) -> OverlayResult<()>;

    /// Position and size the container, in CSS pixels.
    fn set_container_geometry(&mut self, rect: Rect) -> OverlayResult<()>;

    /// Create a detached proxy element with `kind`-specific structural
    /// defaults.
    fn create_proxy(&mut self, kind: ProxyKind) -> OverlayResult<ElementHandle>;

    /// Permanently destroy a proxy element.
    fn destroy_proxy(&mut self, element: ElementHandle) -> OverlayResult<()>;

    /// Append a proxy element to the container.
    fn attach_proxy(&mut self, element: ElementHandle) -> OverlayResult<()>;

    /// Detach a proxy element from the container.
    fn detach_proxy(&mut self, element: ElementHandle) -> OverlayResult<()>;

    /// Position and size a proxy element, in CSS pixels.
    fn set_proxy_geometry(&mut self, element: ElementHandle, rect: Rect) -> OverlayResult<()>;

    /// Set an attribute on a proxy element.
    fn set_proxy_attribute(
        &mut self,
        element: ElementHandle,
        name: &str,
        value: &str,
    ) -> OverlayResult<()>;

    /// Remove an attribute from a proxy element.
    fn remove_proxy_attribute(&mut self, element: ElementHandle, name: &str) -> OverlayResult<()>;

    /// Strip every attribute the overlay applied, leaving the element ready
    /// for reuse.
    fn clear_proxy_attributes(&mut self, element: ElementHandle) -> OverlayResult<()>;

    /// Toggle the debug-visible background on a proxy element.
    fn set_debug_highlight(&mut self, element: ElementHandle, on: bool) -> OverlayResult<()>;
}
