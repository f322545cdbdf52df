/// Scene Module
///
/// Transform graph: scene nodes, their local transforms and parent/child composition.

pub mod description;
pub mod graph;
pub mod node;
pub mod transform;

pub use description::SceneDescription;
pub use graph::SceneGraph;
pub use node::{MeshBounds, NodeCategory, NodeId, NodeOptions, SceneNode};
pub use transform::{compose_trs, decompose, rotation_from_angles, translation_of};
