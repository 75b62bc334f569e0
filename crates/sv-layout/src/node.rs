// ABOUTME: Partition tree node types stored in the layout arena.
// ABOUTME: A node is either a leaf holding content or a split with two children.

use sv_core::{Axis, Rect};

slotmap::new_key_type! {
    /// Handle to a node in the partition tree.
    ///
    /// Keys are generational: a handle to a node that has since been
    /// destroyed never resolves to a different node.
    pub struct NodeId;
}

/// Identifies the divider of one split, for the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DividerId(pub(crate) NodeId);

impl DividerId {
    /// The split node this divider belongs to
    pub fn node(&self) -> NodeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Panes stacked top and bottom, divided by a horizontal line
    Horizontal,
    /// Panes side by side, divided by a vertical line
    Vertical,
}

impl Orientation {
    /// Axis along which the primary size is measured
    pub fn axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::X,
            Orientation::Horizontal => Axis::Y,
        }
    }
}

/// Which child of a split a node occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionNode<C> {
    Leaf {
        /// `None` only for the root once its last content was removed
        content: Option<C>,
        neighbor: Option<C>,
    },
    Split {
        orientation: Orientation,
        primary: NodeId,
        secondary: NodeId,
        /// Pixels given to the primary child along the orientation's axis
        primary_size: f32,
    },
}

impl<C> PartitionNode<C> {
    pub(crate) fn leaf(content: C, neighbor: Option<C>) -> Self {
        PartitionNode::Leaf {
            content: Some(content),
            neighbor,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PartitionNode::Leaf { .. })
    }

    pub fn content(&self) -> Option<&C> {
        match self {
            PartitionNode::Leaf { content, .. } => content.as_ref(),
            PartitionNode::Split { .. } => None,
        }
    }

    pub fn neighbor(&self) -> Option<&C> {
        match self {
            PartitionNode::Leaf { neighbor, .. } => neighbor.as_ref(),
            PartitionNode::Split { .. } => None,
        }
    }

    /// (primary, secondary) for a split
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            PartitionNode::Leaf { .. } => None,
            PartitionNode::Split {
                primary, secondary, ..
            } => Some((*primary, *secondary)),
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        self.children().map(|(primary, secondary)| match side {
            Side::Primary => primary,
            Side::Secondary => secondary,
        })
    }

    /// Bounds of the two children when this split occupies `area`
    pub fn child_bounds(&self, area: Rect) -> Option<(Rect, Rect)> {
        match self {
            PartitionNode::Leaf { .. } => None,
            PartitionNode::Split {
                orientation,
                primary_size,
                ..
            } => Some(area.cut(orientation.axis(), *primary_size)),
        }
    }
}
