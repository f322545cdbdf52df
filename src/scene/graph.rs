use glam::{Mat4, Quat, Vec3};

use crate::error::{EngineError, EngineResult};
use super::node::{NodeCategory, NodeId, NodeOptions, SceneNode};
use super::transform::translation_of;

/// Arena-backed transform graph.
///
/// Nodes live in a flat arena addressed by `NodeId`. Every live node is either in
/// the root list or in exactly one parent's child list; `remove_child` leaves a
/// node detached (kept in the arena, skipped by traversal) until it is attached
/// again with `add_child` or `attach_root`.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> EngineResult<&SceneNode> {
        self.nodes
            .get(id.index())
            .ok_or(EngineError::NodeNotFound { id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> EngineResult<&mut SceneNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or(EngineError::NodeNotFound { id })
    }

    /// Insert a node as a new root. Stale parent/child links on the value are dropped.
    pub fn insert_root(&mut self, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    /// Build a node (and its option children) and add it to the live collection as a root
    pub fn add_node(&mut self, options: &NodeOptions) -> EngineResult<NodeId> {
        let id = self.insert_root(SceneNode::from_options(options));
        for child_options in &options.children {
            let child = self.add_node(child_options)?;
            self.add_child(id, child)?;
        }
        Ok(id)
    }

    /// Set local translation/rotation/scale and recompose the local matrix
    pub fn set_local_trs(
        &mut self,
        id: NodeId,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> EngineResult<()> {
        let node = self.node_mut(id)?;
        node.translation = translation;
        node.rotation = rotation;
        node.scale = scale;
        node.update_matrix();
        Ok(())
    }

    /// Overwrite the local matrix and re-derive translation/rotation/scale from it
    pub fn set_local_matrix(&mut self, id: NodeId, matrix: Mat4) -> EngineResult<()> {
        let node = self.node_mut(id)?;
        node.matrix = matrix;
        node.decompose_matrix();
        Ok(())
    }

    /// Re-derive translation/rotation/scale from the node's current matrix
    pub fn decompose_from_matrix(&mut self, id: NodeId) -> EngineResult<()> {
        self.node_mut(id)?.decompose_matrix();
        Ok(())
    }

    /// World transform: every ancestor's local matrix composed onto the node's own.
    /// Recomputed on each call.
    pub fn global_transform(&self, id: NodeId) -> EngineResult<Mat4> {
        let node = self.node(id)?;
        let mut transform = node.matrix;
        let mut current = node.parent;
        let mut depth = 0usize;

        while let Some(parent_id) = current {
            depth += 1;
            if depth > self.nodes.len() {
                return Err(EngineError::HierarchyCycle { id });
            }
            let parent = self.node(parent_id)?;
            transform = parent.matrix * transform;
            current = parent.parent;
        }

        Ok(transform)
    }

    /// Translation component of the global transform
    pub fn world_translation(&self, id: NodeId) -> EngineResult<Vec3> {
        Ok(translation_of(&self.global_transform(id)?))
    }

    /// True when `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> EngineResult<bool> {
        let mut current = self.node(id)?.parent;
        let mut depth = 0usize;

        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return Ok(true);
            }
            depth += 1;
            if depth > self.nodes.len() {
                return Err(EngineError::HierarchyCycle { id });
            }
            current = self.node(parent_id)?.parent;
        }

        Ok(false)
    }

    /// Attach `child` under `parent`, detaching it from wherever it was first.
    ///
    /// Rejects attaching a node to itself or to one of its own descendants.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> EngineResult<()> {
        self.node(parent)?;
        self.node(child)?;

        if parent == child {
            return Err(EngineError::InvalidHierarchy {
                reason: format!("node {} cannot be its own child", child),
            });
        }
        if self.is_ancestor(child, parent)? {
            return Err(EngineError::InvalidHierarchy {
                reason: format!("node {} is an ancestor of {}", child, parent),
            });
        }

        self.detach(child)?;
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);

        log::trace!("[SceneGraph] Attached {} under {}", child, parent);
        Ok(())
    }

    /// Remove `child` from `parent`'s child list. No-op when it is not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> EngineResult<()> {
        let parent_node = self.node_mut(parent)?;
        let Some(position) = parent_node.children.iter().position(|&c| c == child) else {
            return Ok(());
        };
        parent_node.children.remove(position);
        self.node_mut(child)?.parent = None;

        log::trace!("[SceneGraph] Detached {} from {}", child, parent);
        Ok(())
    }

    /// Put a detached (or parented) node back into the root list
    pub fn attach_root(&mut self, id: NodeId) -> EngineResult<()> {
        self.detach(id)?;
        self.roots.push(id);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> EngineResult<()> {
        match self.node(id)?.parent {
            Some(previous) => self.remove_child(previous, id),
            None => {
                self.roots.retain(|&root| root != id);
                Ok(())
            }
        }
    }

    /// Clone a node without parent, children or camera, as a new root.
    /// Physics state starts from defaults.
    pub fn clone_shallow(&mut self, id: NodeId) -> EngineResult<NodeId> {
        let source = self.node(id)?;
        let copy = SceneNode {
            name: source.name.clone(),
            category: source.category,
            translation: source.translation,
            rotation: source.rotation,
            scale: source.scale,
            matrix: source.matrix,
            aabb: source.aabb,
            mesh: source.mesh,
            ..SceneNode::default()
        };
        Ok(self.insert_root(copy))
    }

    /// Clone a node and its whole subtree into an independent hierarchy rooted at a new root.
    /// The camera component is never duplicated.
    pub fn clone_deep(&mut self, id: NodeId) -> EngineResult<NodeId> {
        let mut copy = self.node(id)?.clone();
        copy.camera = None;
        let children = copy.children.clone();

        let new_id = self.insert_root(copy);
        for child in children {
            let child_copy = self.clone_deep(child)?;
            self.add_child(new_id, child_copy)?;
        }
        Ok(new_id)
    }

    /// Pre-order node ids: each root, then its children depth-first in list order
    pub fn traversal_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            // A corrupted link must not loop forever
            if order.len() > self.nodes.len() {
                log::error!("[SceneGraph] Traversal exceeded node count, hierarchy is corrupted");
                break;
            }
            order.push(id);
            if let Some(node) = self.nodes.get(id.index()) {
                stack.extend(node.children.iter().rev().copied());
            }
        }

        order
    }

    /// Visit every attached node once, pre-order
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &SceneNode),
    {
        for id in self.traversal_order() {
            visitor(id, &self.nodes[id.index()]);
        }
    }

    /// First attached node of a category in traversal order
    pub fn find_first(&self, category: NodeCategory) -> Option<NodeId> {
        self.traversal_order()
            .into_iter()
            .find(|id| self.nodes[id.index()].category == category)
    }

    /// All arena nodes with their ids, detached ones included
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, z: f32) -> NodeOptions {
        NodeOptions {
            translation: Some(Vec3::new(x, y, z)),
            ..NodeOptions::default()
        }
    }

    #[test]
    fn test_global_transform_of_root_is_local() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(&at(1.0, 2.0, 3.0)).unwrap();

        assert_eq!(graph.global_transform(root).unwrap(), graph.node(root).unwrap().matrix);
    }

    #[test]
    fn test_add_child_detaches_from_previous_parent() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(&at(0.0, 0.0, 0.0)).unwrap();
        let b = graph.add_node(&at(5.0, 0.0, 0.0)).unwrap();
        let child = graph.add_node(&at(1.0, 0.0, 0.0)).unwrap();

        graph.add_child(a, child).unwrap();
        graph.add_child(b, child).unwrap();

        assert!(graph.node(a).unwrap().children.is_empty());
        assert_eq!(graph.node(b).unwrap().children, vec![child]);
        assert_eq!(graph.node(child).unwrap().parent, Some(b));
        assert!(!graph.roots().contains(&child));
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(&NodeOptions::default()).unwrap();
        let b = graph.add_node(&NodeOptions::default()).unwrap();
        graph.add_child(a, b).unwrap();

        assert!(matches!(graph.add_child(b, a), Err(EngineError::InvalidHierarchy { .. })));
        assert!(matches!(graph.add_child(a, a), Err(EngineError::InvalidHierarchy { .. })));
        // Rejected operations leave links untouched
        assert_eq!(graph.node(b).unwrap().parent, Some(a));
        assert_eq!(graph.roots(), &[a]);
    }

    #[test]
    fn test_remove_child_is_noop_for_strangers() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(&NodeOptions::default()).unwrap();
        let b = graph.add_node(&NodeOptions::default()).unwrap();

        graph.remove_child(a, b).unwrap();
        assert_eq!(graph.roots(), &[a, b]);
    }

    #[test]
    fn test_removed_child_leaves_traversal_until_reattached() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(&NodeOptions::default()).unwrap();
        let b = graph.add_node(&NodeOptions::default()).unwrap();
        graph.add_child(a, b).unwrap();

        graph.remove_child(a, b).unwrap();
        assert_eq!(graph.traversal_order(), vec![a]);
        assert_eq!(graph.node(b).unwrap().parent, None);

        graph.attach_root(b).unwrap();
        assert_eq!(graph.traversal_order(), vec![a, b]);
    }

    #[test]
    fn test_traversal_is_preorder() {
        let mut graph = SceneGraph::new();
        let options = NodeOptions {
            children: vec![
                NodeOptions {
                    children: vec![NodeOptions::default()],
                    ..NodeOptions::default()
                },
                NodeOptions::default(),
            ],
            ..NodeOptions::default()
        };
        let root = graph.add_node(&options).unwrap();
        let second_root = graph.add_node(&NodeOptions::default()).unwrap();

        let root_node = graph.node(root).unwrap();
        let first = root_node.children[0];
        let second = root_node.children[1];
        let grandchild = graph.node(first).unwrap().children[0];

        assert_eq!(
            graph.traversal_order(),
            vec![root, first, grandchild, second, second_root]
        );

        let mut visited = Vec::new();
        graph.traverse(|id, _| visited.push(id));
        assert_eq!(visited, graph.traversal_order());
    }

    #[test]
    fn test_clone_shallow_drops_links_and_state() {
        let mut graph = SceneGraph::new();
        let options = NodeOptions {
            name: Some("anchor".into()),
            velocity: Some(Vec3::X),
            collidable: Some(false),
            children: vec![NodeOptions::default()],
            ..at(1.0, 2.0, 3.0)
        };
        let source = graph.add_node(&options).unwrap();
        let copy = graph.clone_shallow(source).unwrap();

        let node = graph.node(copy).unwrap();
        assert_eq!(node.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.name.as_deref(), Some("anchor"));
        assert!(node.children.is_empty());
        assert_eq!(node.parent, None);
        assert_eq!(node.velocity, Vec3::ZERO);
        assert!(node.collidable);

        graph.node_mut(copy).unwrap().translation.x = 50.0;
        assert_eq!(graph.node(source).unwrap().translation.x, 1.0);
    }

    #[test]
    fn test_clone_deep_copies_subtree_independently() {
        let mut graph = SceneGraph::new();
        let options = NodeOptions {
            children: vec![NodeOptions {
                children: vec![at(0.0, 0.0, 3.0)],
                ..at(0.0, 2.0, 0.0)
            }],
            ..at(1.0, 0.0, 0.0)
        };
        let source = graph.add_node(&options).unwrap();
        let copy = graph.clone_deep(source).unwrap();

        let copy_child = graph.node(copy).unwrap().children[0];
        let copy_grandchild = graph.node(copy_child).unwrap().children[0];
        let source_child = graph.node(source).unwrap().children[0];

        assert_ne!(copy_child, source_child);
        assert_eq!(graph.node(copy_child).unwrap().parent, Some(copy));
        assert!(graph
            .world_translation(copy_grandchild)
            .unwrap()
            .abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));

        graph.set_local_trs(copy, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE).unwrap();
        assert!(graph
            .world_translation(source_child)
            .unwrap()
            .abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let graph = SceneGraph::new();
        assert!(matches!(
            graph.global_transform(NodeId(3)),
            Err(EngineError::NodeNotFound { .. })
        ));
    }
}
