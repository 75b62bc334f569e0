// ABOUTME: Errors reported by layout tree operations.
// ABOUTME: Every error leaves the tree exactly as it was before the call.

use crate::{DividerId, NodeId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Node {0:?} is not a leaf in this layout")]
    NotALeaf(NodeId),

    #[error("Content is already placed in this layout")]
    DuplicateContent,

    #[error("Leaf {0:?} was already removed")]
    AlreadyRemoved(NodeId),

    #[error("Layout holds no content")]
    EmptyTreeViolation,

    #[error("Layout still holds content")]
    NotEmpty,

    #[error("Divider {0:?} no longer exists")]
    UnknownDivider(DividerId),

    #[error("Invalid size: {0}")]
    InvalidSize(f32),
}
