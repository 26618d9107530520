//! The per-frame reconciler between the scene graph and the DOM overlay.
//!
//! [`OverlayManager`] owns the proxy pool, the overlay container, and the
//! active set. Once per rendered frame it walks the scene graph, binds proxies
//! to newly discovered accessible nodes, evicts nodes that stopped being
//! reachable, and keeps geometry and ARIA attributes of the survivors in sync.
//! All of that happens synchronously inside the host's frame callback; the
//! manager holds no locks and spawns nothing.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace, warn};

use crate::bridge::{self, ActivationEvent, InputDispatch};
use crate::dom::{DomBackend, ElementHandle, ProxyKind};
use crate::error::{OverlayError, OverlayResult};
use crate::geometry::{self, Rect, ViewMetrics};
use crate::pool::{ProxyKey, ProxyPool};
use crate::scene::{AccessMeta, NodeId, SceneNode};
use crate::walker;

/// Event type forwarded on activation when none is configured.
pub const DEFAULT_ACTIVATION_EVENT: &str = "pointerdown";

/// Options recognized by [`OverlayManager::activate`].
#[derive(Debug, Clone)]
pub struct ActivateOptions {
    /// Show proxy hit areas with a visible background.
    pub debug: bool,

    /// DOM event types that constitute an "activation", forwarded in order.
    ///
    /// An empty list keeps the currently configured types.
    pub event_types: Vec<String>,

    /// Host proxies in this element instead of the default auto-positioned
    /// overlay.
    pub container: Option<ElementHandle>,
}

impl Default for ActivateOptions {
    fn default() -> Self {
        Self {
            debug: false,
            event_types: vec![DEFAULT_ACTIVATION_EVENT.to_string()],
            container: None,
        }
    }
}

/// Per-frame notification payload from the host's render loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    /// Whether this frame actually rendered to the visible surface.
    ///
    /// Offscreen renders must not drive reconciliation: their transforms
    /// would desync proxy geometry from what is on screen.
    pub presented: bool,

    /// How the render target maps onto the screen this frame.
    pub metrics: ViewMetrics,
}

/// Operating state of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayState {
    Inactive,
    Active,
}

/// Book-keeping for a node while it is bound to a proxy.
///
/// Presence of an entry in the manager's table is what makes a node
/// "active"; eviction removes the entry outright.
#[derive(Debug)]
struct ProxyState {
    proxy: ProxyKey,
    /// Generation at which the walker last saw this node reachable.
    last_generation: u64,
    /// Last source rectangle applied, for change detection.
    last_hit_area: Option<Rect>,
    /// Set after the first geometry sync; gates `render_once` nodes.
    geometry_synced: bool,
    /// ARIA label currently written on the proxy.
    applied_label: Option<String>,
    /// Attribute mapping currently written on the proxy.
    applied_attributes: BTreeMap<String, String>,
}

/// Reconciles a scene graph's accessible nodes with pooled DOM proxies.
///
/// The manager is constructed with its two collaborators injected: the
/// [`DomBackend`] it writes proxies through and the [`InputDispatch`] it
/// forwards activations into. The host render loop forwards its post-render
/// signal to [`frame_rendered`](Self::frame_rendered), and the backend
/// forwards DOM activation events to
/// [`notify_activation`](Self::notify_activation).
///
/// # Example
///
/// ```ignore
/// let mut overlay = OverlayManager::new(web_backend, interaction);
/// overlay.activate(ActivateOptions::default(), &metrics)?;
///
/// // inside the render loop, after presenting a frame:
/// overlay.frame_rendered(&frame_info, &stage);
/// ```
pub struct OverlayManager<B: DomBackend, D: InputDispatch> {
    backend: B,
    dispatch: D,
    pool: ProxyPool,
    /// Currently bound nodes in discovery order, which is DOM child order.
    active: Vec<NodeId>,
    states: HashMap<NodeId, ProxyState>,
    generation: u64,
    state: OverlayState,
    debug: bool,
    event_types: Vec<String>,
    last_metrics: Option<ViewMetrics>,
}

impl<B: DomBackend, D: InputDispatch> OverlayManager<B, D> {
    /// Create an inactive manager around the injected collaborators.
    pub fn new(backend: B, dispatch: D) -> Self {
        Self {
            backend,
            dispatch,
            pool: ProxyPool::new(),
            active: Vec::new(),
            states: HashMap::new(),
            generation: 0,
            state: OverlayState::Inactive,
            debug: false,
            event_types: vec![DEFAULT_ACTIVATION_EVENT.to_string()],
            last_metrics: None,
        }
    }

    /// Attach the overlay and start reconciling on frame signals.
    ///
    /// Positions the container over the render target described by
    /// `metrics`. Calling this while already active refreshes the debug and
    /// event-type options but is otherwise a no-op.
    pub fn activate(&mut self, options: ActivateOptions, metrics: &ViewMetrics) -> OverlayResult<()> {
        self.debug = options.debug;
        if !options.event_types.is_empty() {
            self.event_types = options.event_types;
        }

        if self.state == OverlayState::Active {
            return Ok(());
        }

        self.backend.attach_container(options.container)?;
        if let Err(err) = self.backend.set_container_geometry(metrics.container_rect()) {
            // A failed activation must not leave the container in the
            // document; a later retry attaches it again.
            if let Err(detach_err) = self.backend.detach_container() {
                warn!(%detach_err, "failed to detach overlay container after activation error");
            }
            return Err(err);
        }
        self.last_metrics = Some(*metrics);
        self.state = OverlayState::Active;
        debug!(debug_mode = self.debug, "accessibility overlay activated");
        Ok(())
    }

    /// Detach the overlay and stop reconciling.
    ///
    /// Releases every bound proxy back to the pool and removes the container
    /// from the document. Idempotent, and safe to call from within a
    /// reconciliation pass (which is how self-deactivation on an empty scene
    /// works) as well as from external teardown.
    pub fn deactivate(&mut self) {
        if self.state == OverlayState::Inactive {
            return;
        }

        while let Some(id) = self.active.pop() {
            self.unbind(id);
        }

        if let Err(err) = self.backend.detach_container() {
            warn!(%err, "failed to detach overlay container");
        }
        self.state = OverlayState::Inactive;
        debug!("accessibility overlay deactivated");
    }

    /// Tear the overlay down completely.
    ///
    /// Deactivates, destroys every pooled element, and drops the container
    /// reference, handing the backend back to the host. Nothing the manager
    /// held keeps scene-graph nodes alive afterwards.
    pub fn destroy(mut self) -> B {
        self.deactivate();
        self.pool.destroy_all(&mut self.backend);
        self.states.clear();
        debug!("accessibility overlay destroyed");
        self.backend
    }

    /// Per-frame reconciliation, driven by the host's post-render signal.
    ///
    /// Ignored while inactive and for frames that were not presented to the
    /// visible surface. A failure on one node is logged and skipped so the
    /// node can retry next frame; it never propagates out of the frame
    /// callback.
    pub fn frame_rendered(&mut self, frame: &FrameInfo, root: &dyn SceneNode) {
        if self.state != OverlayState::Active || !frame.presented {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        trace!(generation, "reconciling accessibility overlay");

        if self.last_metrics != Some(frame.metrics) {
            if let Err(err) = self
                .backend
                .set_container_geometry(frame.metrics.container_rect())
            {
                warn!(%err, "failed to reposition overlay container");
            }
            self.last_metrics = Some(frame.metrics);
        }

        let states = &mut self.states;
        let reachable = walker::mark(root, generation, &mut |id, generation| {
            if let Some(state) = states.get_mut(&id) {
                state.last_generation = generation;
            }
        });

        // Bind newly discovered nodes in traversal order, which seeds the
        // active set's insertion order.
        for node in &reachable {
            if !self.states.contains_key(&node.node_id())
                && let Err(err) = self.bind(*node, generation)
            {
                warn!(node = node.node_id().0, %err, "failed to bind accessible node, retrying next frame");
            }
        }

        let live: HashMap<NodeId, &dyn SceneNode> = reachable
            .iter()
            .map(|node| (node.node_id(), *node))
            .collect();

        let mut index = 0;
        while index < self.active.len() {
            let id = self.active[index];
            let stale = self
                .states
                .get(&id)
                .is_none_or(|state| state.last_generation != generation);

            if stale {
                self.active.remove(index);
                self.unbind(id);
            } else {
                if let Some(node) = live.get(&id)
                    && let Err(err) = self.sync(*node, &frame.metrics)
                {
                    warn!(node = id.0, %err, "failed to sync accessible node, retrying next frame");
                }
                index += 1;
            }
        }

        // The overlay exists for its proxies. With none left there is
        // nothing to keep in sync, so the pass ends in the inactive state.
        if self.active.is_empty() {
            trace!("no accessible nodes remain, self-deactivating");
            self.deactivate();
        }
    }

    /// Route a DOM activation event on a proxy into the host's input
    /// dispatch.
    ///
    /// Forwards one synthetic event per configured activation event type, in
    /// order, targeting the proxy's bound node. Host dispatch errors pass
    /// through unchanged.
    pub fn notify_activation(&mut self, event: &ActivationEvent) -> OverlayResult<()> {
        let target = self
            .pool
            .bound_node(event.element)
            .ok_or(OverlayError::UnboundProxy)?;
        bridge::forward(&mut self.dispatch, target, &self.event_types, event)
    }

    /// Whether the manager is currently active.
    pub fn is_active(&self) -> bool {
        self.state == OverlayState::Active
    }

    /// Nodes currently bound to a proxy, in DOM child order.
    pub fn active_nodes(&self) -> &[NodeId] {
        &self.active
    }

    /// The proxy pool, for observation.
    pub fn pool(&self) -> &ProxyPool {
        &self.pool
    }

    /// Get the underlying DOM backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a mutable reference to the underlying DOM backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Get the injected input dispatch.
    pub fn dispatch(&self) -> &D {
        &self.dispatch
    }

    /// Get a mutable reference to the injected input dispatch.
    pub fn dispatch_mut(&mut self) -> &mut D {
        &mut self.dispatch
    }

    /// Bind a newly discovered node: acquire a proxy, apply its attributes,
    /// and attach it to the container.
    ///
    /// Initial geometry is applied by the sync step later in the same pass.
    fn bind(&mut self, node: &dyn SceneNode, generation: u64) -> OverlayResult<()> {
        let Some(meta) = node.accessibility() else {
            return Ok(());
        };
        let id = node.node_id();
        let kind = ProxyKind::for_node(node);
        let key = self.pool.acquire(&mut self.backend, kind, id, self.debug)?;
        let element = self.pool.element(key);

        let label = resolve_label(meta);
        if let Err(err) = apply_initial(&mut self.backend, element, meta, label.as_deref()) {
            // Hand the proxy straight back so a failed bind cannot strand it.
            let _ = self.pool.release(&mut self.backend, key);
            return Err(err);
        }

        self.active.push(id);
        self.states.insert(
            id,
            ProxyState {
                proxy: key,
                last_generation: generation,
                last_hit_area: None,
                geometry_synced: false,
                applied_label: label,
                applied_attributes: meta.attributes.clone(),
            },
        );
        debug!(node = id.0, ?kind, "bound accessible node to proxy");
        Ok(())
    }

    /// Release a node's proxy and forget its state.
    fn unbind(&mut self, id: NodeId) {
        let Some(state) = self.states.remove(&id) else {
            return;
        };
        let element = self.pool.element(state.proxy);
        if let Err(err) = self.backend.detach_proxy(element) {
            warn!(node = id.0, %err, "failed to detach proxy element");
        }
        if let Err(err) = self.pool.release(&mut self.backend, state.proxy) {
            warn!(node = id.0, %err, "failed to release proxy");
        }
        debug!(node = id.0, "evicted accessible node");
    }

    /// Push geometry and attribute changes for a live node onto its proxy.
    fn sync(&mut self, node: &dyn SceneNode, metrics: &ViewMetrics) -> OverlayResult<()> {
        let Some(meta) = node.accessibility() else {
            return Ok(());
        };
        let Some(state) = self.states.get_mut(&node.node_id()) else {
            return Ok(());
        };
        let element = self.pool.element(state.proxy);

        // Geometry: explicit hit areas re-sync only when the rectangle
        // changed; derived bounds re-sync every frame. `render_once`
        // suppresses both after the first placement.
        if !(meta.render_once && state.geometry_synced) {
            if let Some(hit) = node.hit_area() {
                if state.last_hit_area != Some(hit) {
                    let rect = geometry::map_hit_area(hit, node.world_transform(), metrics);
                    self.backend.set_proxy_geometry(element, rect)?;
                    state.last_hit_area = Some(hit);
                    state.geometry_synced = true;
                }
            } else {
                let bounds = node.bounds();
                let rect = geometry::map_bounds(bounds, metrics);
                self.backend.set_proxy_geometry(element, rect)?;
                state.last_hit_area = Some(bounds);
                state.geometry_synced = true;
            }
        }

        // Attributes: write only what differs from what the proxy carries.
        if meta.attributes != state.applied_attributes {
            for name in state.applied_attributes.keys() {
                if !meta.attributes.contains_key(name) {
                    self.backend.remove_proxy_attribute(element, name)?;
                }
            }
            for (name, value) in &meta.attributes {
                if state.applied_attributes.get(name) != Some(value) {
                    self.backend.set_proxy_attribute(element, name, value)?;
                }
            }
            state.applied_attributes = meta.attributes.clone();
        }

        let label = resolve_label(meta);
        if label != state.applied_label {
            match &label {
                Some(label) => self.backend.set_proxy_attribute(element, "aria-label", label)?,
                None => self.backend.remove_proxy_attribute(element, "aria-label")?,
            }
            state.applied_label = label;
        }

        Ok(())
    }
}

/// The read-aloud text for a proxy: the hint, falling back to a declared
/// `title` attribute.
fn resolve_label(meta: &AccessMeta) -> Option<String> {
    meta.hint
        .clone()
        .or_else(|| meta.attributes.get("title").cloned())
}

/// Write a freshly bound node's attributes and attach its proxy.
fn apply_initial<B: DomBackend>(
    backend: &mut B,
    element: ElementHandle,
    meta: &AccessMeta,
    label: Option<&str>,
) -> OverlayResult<()> {
    for (name, value) in &meta.attributes {
        backend.set_proxy_attribute(element, name, value)?;
    }
    if let Some(label) = label {
        backend.set_proxy_attribute(element, "aria-label", label)?;
    }
    backend.attach_proxy(element)
}
