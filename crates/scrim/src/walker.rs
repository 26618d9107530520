//! Scene-graph traversal that marks the currently reachable accessible set.

use crate::scene::{NodeId, SceneNode};

/// Walk the scene graph from `root` and collect every reachable accessible
/// node, depth-first, parent before children, children in sibling order.
///
/// Subtrees rooted at a non-visible or non-renderable node are skipped
/// entirely: hidden content must not be reachable by assistive technologies.
/// `stamp` is invoked with the current generation for every accessible node
/// visited, which is how the reconciler later tells live nodes from stale
/// ones.
///
/// An explicit work stack keeps deeply nested scenes from growing the call
/// stack.
pub(crate) fn mark<'a>(
    root: &'a dyn SceneNode,
    generation: u64,
    stamp: &mut dyn FnMut(NodeId, u64),
) -> Vec<&'a dyn SceneNode> {
    let mut reachable: Vec<&'a dyn SceneNode> = Vec::new();
    let mut stack: Vec<&'a dyn SceneNode> = vec![root];

    while let Some(node) = stack.pop() {
        if !node.is_visible() || !node.is_renderable() {
            continue;
        }

        if node.accessibility().is_some() {
            stamp(node.node_id(), generation);
            reachable.push(node);
        }

        // Reversed so the stack pops children in their defined order.
        for child in node.children().into_iter().rev() {
            stack.push(child);
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, WorldTransform};
    use crate::scene::AccessMeta;

    struct TestNode {
        id: u64,
        visible: bool,
        meta: Option<AccessMeta>,
        children: Vec<TestNode>,
    }

    impl TestNode {
        fn plain(id: u64, children: Vec<TestNode>) -> Self {
            Self {
                id,
                visible: true,
                meta: None,
                children,
            }
        }

        fn accessible(id: u64, children: Vec<TestNode>) -> Self {
            Self {
                meta: Some(AccessMeta::default()),
                ..Self::plain(id, children)
            }
        }
    }

    impl SceneNode for TestNode {
        fn node_id(&self) -> NodeId {
            NodeId(self.id)
        }
        fn is_visible(&self) -> bool {
            self.visible
        }
        fn is_renderable(&self) -> bool {
            true
        }
        fn children(&self) -> Vec<&dyn SceneNode> {
            self.children.iter().map(|c| c as &dyn SceneNode).collect()
        }
        fn world_transform(&self) -> WorldTransform {
            WorldTransform::IDENTITY
        }
        fn bounds(&self) -> Rect {
            Rect::ZERO
        }
        fn accessibility(&self) -> Option<&AccessMeta> {
            self.meta.as_ref()
        }
    }

    fn reachable_ids(root: &TestNode) -> Vec<u64> {
        mark(root, 1, &mut |_, _| {})
            .iter()
            .map(|n| n.node_id().0)
            .collect()
    }

    #[test]
    fn traversal_is_depth_first_in_sibling_order() {
        let root = TestNode::plain(
            0,
            vec![
                TestNode::accessible(1, vec![TestNode::accessible(2, vec![])]),
                TestNode::accessible(3, vec![]),
            ],
        );

        assert_eq!(reachable_ids(&root), vec![1, 2, 3]);
    }

    #[test]
    fn hidden_subtrees_are_skipped_entirely() {
        let mut hidden = TestNode::accessible(1, vec![TestNode::accessible(2, vec![])]);
        hidden.visible = false;
        let root = TestNode::plain(0, vec![hidden, TestNode::accessible(3, vec![])]);

        assert_eq!(reachable_ids(&root), vec![3]);
    }

    #[test]
    fn stamp_sees_every_accessible_node_with_the_generation() {
        let root = TestNode::plain(
            0,
            vec![TestNode::accessible(1, vec![]), TestNode::accessible(2, vec![])],
        );

        let mut stamped = Vec::new();
        mark(&root, 7, &mut |id, generation| stamped.push((id, generation)));

        assert_eq!(stamped, vec![(NodeId(1), 7), (NodeId(2), 7)]);
    }
}
