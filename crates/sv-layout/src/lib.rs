// ABOUTME: Pane layout management for split editor areas.
// ABOUTME: Binary partition tree with split, remove, and divider resizing.

mod engine;
mod error;
mod extent;
mod node;
mod walk;

pub use engine::{LayoutEngine, Placement, Removal};
pub use error::LayoutError;
pub use extent::ExtentSource;
pub use node::{DividerId, NodeId, Orientation, PartitionNode, Side};
pub use sv_core::{Axis, Rect};
pub use walk::{DividerView, LeafView};
