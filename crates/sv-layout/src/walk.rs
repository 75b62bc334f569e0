// ABOUTME: Depth-first traversal of the partition tree with resolved bounds.
// ABOUTME: Yields leaves and dividers in primary-before-secondary order.

use sv_core::Rect;

use crate::{DividerId, LayoutEngine, NodeId, Orientation, PartitionNode, Side};

/// A visible pane as seen by the rendering collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct LeafView<'a, C> {
    pub id: NodeId,
    pub content: &'a C,
    pub neighbor: Option<&'a C>,
    pub bounds: Rect,
    /// Steps taken from the root to reach this leaf
    pub path: Vec<Side>,
}

/// A divider and the strip of pixels that grabs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerView {
    pub id: DividerId,
    pub orientation: Orientation,
    pub primary_size: f32,
    /// Grab band centered on the boundary between the two children
    pub bounds: Rect,
    /// Area shared by both children of the split
    pub region: Rect,
}

pub(crate) struct Visit<'a, C> {
    pub id: NodeId,
    pub node: &'a PartitionNode<C>,
    pub bounds: Rect,
    pub path: Vec<Side>,
}

#[derive(Clone)]
struct Frame {
    id: NodeId,
    bounds: Rect,
    path: Vec<Side>,
}

pub(crate) struct Walk<'a, C> {
    engine: &'a LayoutEngine<C>,
    stack: Vec<Frame>,
}

impl<C> Clone for Walk<'_, C> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, C> Walk<'a, C> {
    pub fn new(engine: &'a LayoutEngine<C>) -> Self {
        Self {
            engine,
            stack: vec![Frame {
                id: engine.root(),
                bounds: engine.area(),
                path: Vec::new(),
            }],
        }
    }
}

impl<'a, C> Iterator for Walk<'a, C> {
    type Item = Visit<'a, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        let node = self.engine.node(frame.id)?;

        if let (Some((primary, secondary)), Some((primary_bounds, secondary_bounds))) =
            (node.children(), node.child_bounds(frame.bounds))
        {
            // Secondary first so primary pops first
            let mut secondary_path = frame.path.clone();
            secondary_path.push(Side::Secondary);
            self.stack.push(Frame {
                id: secondary,
                bounds: secondary_bounds,
                path: secondary_path,
            });

            let mut primary_path = frame.path.clone();
            primary_path.push(Side::Primary);
            self.stack.push(Frame {
                id: primary,
                bounds: primary_bounds,
                path: primary_path,
            });
        }

        Some(Visit {
            id: frame.id,
            node,
            bounds: frame.bounds,
            path: frame.path,
        })
    }
}

impl<'a, C> Visit<'a, C> {
    pub fn into_leaf(self) -> Option<LeafView<'a, C>> {
        match self.node {
            PartitionNode::Leaf {
                content: Some(content),
                neighbor,
            } => Some(LeafView {
                id: self.id,
                content,
                neighbor: neighbor.as_ref(),
                bounds: self.bounds,
                path: self.path,
            }),
            _ => None,
        }
    }

    pub fn into_divider(self, thickness: f32) -> Option<DividerView> {
        match self.node {
            PartitionNode::Split {
                orientation,
                primary_size,
                ..
            } => {
                let axis = orientation.axis();
                let total = self.bounds.extent(axis).max(0.0);
                let offset = primary_size.max(0.0).min(total);
                Some(DividerView {
                    id: DividerId(self.id),
                    orientation: *orientation,
                    primary_size: *primary_size,
                    bounds: self.bounds.band(axis, offset, thickness),
                    region: self.bounds,
                })
            }
            PartitionNode::Leaf { .. } => None,
        }
    }
}
