//! Scrim - an invisible DOM overlay that makes canvas scene graphs reachable
//! by assistive technologies.
//!
//! A 2D scene graph rendered to a canvas is just pixels as far as screen
//! readers, switch access, and mobile accessibility services are concerned.
//! Scrim reconciles the scene graph with a pooled set of DOM proxy elements
//! once per rendered frame: accessible nodes get an absolutely positioned
//! proxy tracking their on-screen footprint and mirroring their ARIA
//! attributes, and activating a proxy is routed back into the host's input
//! dispatch as synthetic events.
//!
//! # Architecture
//!
//! - [`SceneNode`]: capability trait the host implements on its scene-graph
//!   nodes
//! - [`DomBackend`]: the injected DOM seam (`web-sys` in a wasm host, a
//!   recording mock in tests)
//! - [`InputDispatch`]: the host's synthetic-event entry point
//! - [`OverlayManager`]: the per-frame reconciler tying them together
//! - [`activation_plan`]: platform policy for when to activate at all
//!
//! # Example
//!
//! ```ignore
//! use scrim::{ActivateOptions, OverlayManager};
//!
//! let mut overlay = OverlayManager::new(backend, dispatch);
//! overlay.activate(ActivateOptions { debug: true, ..Default::default() }, &metrics)?;
//!
//! // forwarded from the render loop after each presented frame:
//! overlay.frame_rendered(&frame_info, &stage);
//! ```
//!
//! # Logging
//!
//! Scrim instruments itself with the `tracing` crate; install a subscriber
//! such as `tracing_subscriber::fmt` in the host to see lifecycle and
//! reconciliation logs.

pub mod auto;
pub mod bridge;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod manager;
pub mod pool;
pub mod scene;

mod walker;

pub use auto::{ActivationPlan, DEFAULT_OPT_IN_TIP, PlatformHints, activation_plan};
pub use bridge::{ActivationEvent, InputDispatch};
pub use dom::{DomBackend, ElementHandle, ProxyKind};
pub use error::{OverlayError, OverlayResult};
pub use geometry::{Point, Rect, Size, ViewMetrics, WorldTransform};
pub use manager::{ActivateOptions, DEFAULT_ACTIVATION_EVENT, FrameInfo, OverlayManager};
pub use pool::{Proxy, ProxyKey, ProxyPool};
pub use scene::{AccessMeta, NodeId, SceneNode};
