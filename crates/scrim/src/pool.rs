//! Pooling of DOM proxy elements.
//!
//! Creating a DOM element is the expensive part of binding a node, so
//! released proxies are kept around and handed back out for the next node of
//! the same kind. Elements are only destroyed when the whole overlay is torn
//! down.

use slotmap::{SlotMap, new_key_type};

use crate::dom::{DomBackend, ElementHandle, ProxyKind};
use crate::error::OverlayResult;
use crate::geometry::Rect;
use crate::scene::NodeId;

/// Default footprint a proxy gets before its first geometry sync, in CSS
/// pixels.
pub const PROXY_DEFAULT_SIZE: f32 = 100.0;

new_key_type! {
    /// A unique identifier for a pooled proxy element.
    pub struct ProxyKey;
}

/// A pooled DOM proxy element.
#[derive(Debug)]
pub struct Proxy {
    /// Structural kind, fixed at creation.
    pub kind: ProxyKind,
    /// The backend element this proxy wraps.
    pub element: ElementHandle,
    /// Node currently using this proxy, or `None` while idle in the pool.
    ///
    /// A bare ID, never an ownership edge: a destroyed node simply stops
    /// being marked by the walker and the binding is dropped on eviction.
    pub bound_node: Option<NodeId>,
}

/// Allocates, recycles, and destroys proxy elements.
#[derive(Debug, Default)]
pub struct ProxyPool {
    proxies: SlotMap<ProxyKey, Proxy>,
    idle_buttons: Vec<ProxyKey>,
    idle_labels: Vec<ProxyKey>,
}

impl ProxyPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a proxy for `node`, reusing an idle one of the same kind when
    /// available.
    ///
    /// Freshly created proxies get their structural defaults from the
    /// backend, the default footprint, and the debug highlight when debug
    /// mode is on.
    pub fn acquire<B: DomBackend>(
        &mut self,
        backend: &mut B,
        kind: ProxyKind,
        node: NodeId,
        debug: bool,
    ) -> OverlayResult<ProxyKey> {
        let key = match self.idle_list(kind).pop() {
            Some(key) => key,
            None => {
                let element = backend.create_proxy(kind)?;
                backend.set_proxy_geometry(
                    element,
                    Rect::new(0.0, 0.0, PROXY_DEFAULT_SIZE, PROXY_DEFAULT_SIZE),
                )?;
                backend.set_debug_highlight(element, debug)?;
                self.proxies.insert(Proxy {
                    kind,
                    element,
                    bound_node: None,
                })
            }
        };

        self.proxies[key].bound_node = Some(node);
        Ok(key)
    }

    /// Release a proxy back to the pool.
    ///
    /// Clears the bound node and the ARIA state applied while it was live;
    /// the underlying element survives for reuse. The proxy is idle after
    /// this call even when the attribute clear fails: the returned error
    /// reports the failed clear, never a stranded element.
    pub fn release<B: DomBackend>(&mut self, backend: &mut B, key: ProxyKey) -> OverlayResult<()> {
        let proxy = &mut self.proxies[key];
        proxy.bound_node = None;
        let element = proxy.element;
        let kind = proxy.kind;
        self.idle_list(kind).push(key);
        backend.clear_proxy_attributes(element)
    }

    /// Look up a proxy.
    pub fn get(&self, key: ProxyKey) -> Option<&Proxy> {
        self.proxies.get(key)
    }

    /// Backend element of a proxy.
    ///
    /// Panics on a key that was never issued by this pool.
    pub fn element(&self, key: ProxyKey) -> ElementHandle {
        self.proxies[key].element
    }

    /// Resolve the node bound to a backend element, if any.
    ///
    /// Linear scan: overlays hold a handful of proxies, so an index would
    /// cost more than it saves.
    pub fn bound_node(&self, element: ElementHandle) -> Option<NodeId> {
        self.proxies
            .values()
            .find(|proxy| proxy.element == element)
            .and_then(|proxy| proxy.bound_node)
    }

    /// Number of idle proxies waiting for reuse.
    pub fn idle_count(&self) -> usize {
        self.idle_buttons.len() + self.idle_labels.len()
    }

    /// Total number of live elements, bound or idle.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Whether the pool holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Destroy every element and empty the pool.
    ///
    /// Destruction is best-effort: a backend failure on one element must not
    /// leak the rest.
    pub fn destroy_all<B: DomBackend>(&mut self, backend: &mut B) {
        for proxy in self.proxies.values() {
            if let Err(err) = backend.destroy_proxy(proxy.element) {
                tracing::warn!(element = proxy.element.0, %err, "failed to destroy proxy");
            }
        }
        self.proxies.clear();
        self.idle_buttons.clear();
        self.idle_labels.clear();
    }

    fn idle_list(&mut self, kind: ProxyKind) -> &mut Vec<ProxyKey> {
        match kind {
            ProxyKind::Button => &mut self.idle_buttons,
            ProxyKind::Label => &mut self.idle_labels,
        }
    }
}
