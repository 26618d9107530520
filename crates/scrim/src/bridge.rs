//! Routing of DOM activation events back into the host's input dispatch.

use crate::dom::ElementHandle;
use crate::error::{OverlayError, OverlayResult};
use crate::geometry::Point;
use crate::scene::NodeId;

/// A DOM activation event delivered against a proxy element.
///
/// The backend constructs one of these from whatever DOM event it listens
/// for and hands it to [`OverlayManager::notify_activation`].
///
/// [`OverlayManager::notify_activation`]: crate::OverlayManager::notify_activation
#[derive(Debug, Clone, Copy)]
pub struct ActivationEvent {
    /// The proxy element the event targeted.
    pub element: ElementHandle,
    /// Pointer position in CSS pixels, when the source event carried one.
    pub pointer: Option<Point>,
}

impl ActivationEvent {
    /// Create an activation event for an element with no pointer data.
    pub fn new(element: ElementHandle) -> Self {
        Self {
            element,
            pointer: None,
        }
    }
}

/// The host's input-dispatch entry point.
///
/// Injected into the manager at construction; the overlay forwards one
/// synthetic event per configured activation event type through this trait.
pub trait InputDispatch {
    /// Inject a synthetic event of `event_type` against `target`.
    ///
    /// Errors are the host's own and pass back through the overlay
    /// unchanged.
    fn dispatch(
        &mut self,
        target: NodeId,
        event_type: &str,
        event: &ActivationEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Forward an activation against `target` as one synthetic event per
/// configured event type, in configuration order.
pub(crate) fn forward<D: InputDispatch>(
    dispatch: &mut D,
    target: NodeId,
    event_types: &[String],
    event: &ActivationEvent,
) -> OverlayResult<()> {
    for event_type in event_types {
        dispatch
            .dispatch(target, event_type, event)
            .map_err(OverlayError::Dispatch)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDispatch {
        calls: Vec<(NodeId, String)>,
        fail_on: Option<String>,
    }

    impl InputDispatch for RecordingDispatch {
        fn dispatch(
            &mut self,
            target: NodeId,
            event_type: &str,
            _event: &ActivationEvent,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            if self.fail_on.as_deref() == Some(event_type) {
                return Err(format!("host rejected {event_type}").into());
            }
            self.calls.push((target, event_type.to_string()));
            Ok(())
        }
    }

    #[test]
    fn forwards_one_event_per_configured_type_in_order() {
        let mut dispatch = RecordingDispatch::default();
        let event = ActivationEvent::new(ElementHandle(1));
        let types = vec!["a".to_string(), "b".to_string()];

        forward(&mut dispatch, NodeId(9), &types, &event).unwrap();

        assert_eq!(
            dispatch.calls,
            vec![(NodeId(9), "a".to_string()), (NodeId(9), "b".to_string())]
        );
    }

    #[test]
    fn host_errors_pass_through_unchanged() {
        let mut dispatch = RecordingDispatch {
            fail_on: Some("tap".to_string()),
            ..Default::default()
        };
        let event = ActivationEvent::new(ElementHandle(1));
        let types = vec!["touchstart".to_string(), "tap".to_string()];

        let err = forward(&mut dispatch, NodeId(3), &types, &event).unwrap_err();

        assert_eq!(err.to_string(), "host rejected tap");
        // The first event type was still delivered before the failure.
        assert_eq!(dispatch.calls.len(), 1);
    }
}
