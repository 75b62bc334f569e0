// ABOUTME: Layout engine owning the partition tree of one editor area.
// ABOUTME: Splits panes in half, collapses splits on removal, resizes dividers.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use slotmap::SlotMap;
use sv_core::{LayoutSettings, Rect};

use crate::walk::{DividerView, LeafView, Walk};
use crate::{DividerId, ExtentSource, LayoutError, NodeId, Orientation, PartitionNode, Side};

#[derive(Debug, Clone)]
struct Slot<C> {
    node: PartitionNode<C>,
    /// Non-owning back-reference, `None` for the root
    parent: Option<NodeId>,
}

/// Where a split put the new content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Leaf holding the new content
    pub leaf: NodeId,
    /// Divider between the original and the new leaf
    pub divider: DividerId,
}

/// What a remove took out and who should take focus
#[derive(Debug, Clone, PartialEq)]
pub struct Removal<C> {
    pub content: C,
    /// The removed leaf's neighbor, if that content is still laid out
    pub neighbor: Option<C>,
    /// First leaf of the subtree that took over the freed area
    pub successor: Option<NodeId>,
}

/// Binary partition of one editor area into panes.
///
/// Nodes live in a generational arena. Leaf handles stay valid until the
/// leaf is removed; the leaf that gets split keeps its handle and moves down
/// to become the primary child.
#[derive(Debug)]
pub struct LayoutEngine<C> {
    nodes: SlotMap<NodeId, Slot<C>>,
    root: NodeId,
    index: HashMap<C, NodeId>,
    /// Handles consumed by `remove`, so reuse reports `AlreadyRemoved`.
    /// Grows by one key per remove for the life of the engine.
    removed: HashSet<NodeId>,
    area: Rect,
    settings: LayoutSettings,
}

impl<C> LayoutEngine<C> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Resize the whole editor area; split sizes are kept as-is
    pub fn set_area(&mut self, area: Rect) -> Result<(), LayoutError> {
        if !area.is_valid() {
            return Err(invalid_area(area));
        }
        tracing::debug!("Layout area changed to {:?}", area);
        self.area = area;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&PartitionNode<C>> {
        self.nodes.get(id).map(|slot| &slot.node)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|slot| slot.parent)
    }

    pub fn content_of(&self, id: NodeId) -> Option<&C> {
        self.node(id).and_then(PartitionNode::content)
    }

    pub fn neighbor_of(&self, id: NodeId) -> Option<&C> {
        self.node(id).and_then(PartitionNode::neighbor)
    }

    /// Number of panes holding content
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True once the last content was removed
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn split_count(&self) -> usize {
        self.nodes.values().filter(|slot| !slot.node.is_leaf()).count()
    }

    /// Longest root-to-leaf path, 0 for a single pane
    pub fn depth(&self) -> usize {
        Walk::new(self).map(|visit| visit.path.len()).max().unwrap_or(0)
    }

    /// Panes in primary-before-secondary order with their bounds.
    ///
    /// Each call starts a fresh traversal.
    pub fn leaves(&self) -> impl Iterator<Item = LeafView<'_, C>> + Clone + '_ {
        Walk::new(self).filter_map(|visit| visit.into_leaf())
    }

    /// Dividers in the same order as `leaves`, parents before children
    pub fn dividers(&self) -> impl Iterator<Item = DividerView> + Clone + '_ {
        let thickness = self.settings.divider_thickness;
        Walk::new(self).filter_map(move |visit| visit.into_divider(thickness))
    }

    /// Pixel bounds a node currently occupies
    pub fn bounds_of(&self, id: NodeId) -> Option<Rect> {
        let mut chain = Vec::new();
        let mut current = id;
        let mut slot = self.nodes.get(id)?;
        while let Some(parent) = slot.parent {
            chain.push((parent, current));
            current = parent;
            slot = self.nodes.get(parent)?;
        }

        let mut bounds = self.area;
        for (parent, child) in chain.into_iter().rev() {
            let node = self.node(parent)?;
            let (primary_bounds, secondary_bounds) = node.child_bounds(bounds)?;
            bounds = if node.child(Side::Primary) == Some(child) {
                primary_bounds
            } else {
                secondary_bounds
            };
        }
        tracing::trace!("Resolved {:?} to {:?}", id, bounds);
        Some(bounds)
    }

    /// Move a divider; returns the size actually applied.
    ///
    /// The size is clamped so both sides keep at least `min_pane_extent`
    /// pixels, or half the split each when it is smaller than that.
    pub fn set_primary_size(&mut self, divider: DividerId, size: f32) -> Result<f32, LayoutError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(LayoutError::InvalidSize(size));
        }
        let split = divider.node();
        let axis = match self.node(split) {
            Some(PartitionNode::Split { orientation, .. }) => orientation.axis(),
            _ => return Err(LayoutError::UnknownDivider(divider)),
        };

        let total = self.bounds_of(split).map(|b| b.extent(axis)).unwrap_or(0.0);
        let margin = self.settings.min_pane_extent.min(total / 2.0).max(0.0);
        let applied = size.clamp(margin, (total - margin).max(margin));

        if let Some(PartitionNode::Split { primary_size, .. }) =
            self.nodes.get_mut(split).map(|slot| &mut slot.node)
        {
            *primary_size = applied;
        }
        tracing::debug!("Divider {:?} moved to {} (requested {})", divider, applied, size);
        Ok(applied)
    }

    fn first_leaf(&self, mut id: NodeId) -> NodeId {
        while let Some(primary) = self.node(id).and_then(|node| node.child(Side::Primary)) {
            id = primary;
        }
        id
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        let Some(parent) = parent else {
            self.root = new;
            return;
        };
        if let Some(PartitionNode::Split {
            primary, secondary, ..
        }) = self.nodes.get_mut(parent).map(|slot| &mut slot.node)
        {
            if *primary == old {
                *primary = new;
            } else if *secondary == old {
                *secondary = new;
            }
        }
    }

    /// Content of `id` if it is a live leaf, checked before any mutation
    fn check_leaf(&self, id: NodeId) -> Result<&C, LayoutError> {
        if self.removed.contains(&id) {
            return Err(LayoutError::AlreadyRemoved(id));
        }
        if self.is_empty() {
            return Err(LayoutError::EmptyTreeViolation);
        }
        self.content_of(id).ok_or(LayoutError::NotALeaf(id))
    }
}

/// The first offending dimension of an unusable area
fn invalid_area(area: Rect) -> LayoutError {
    let bad = [area.width, area.height]
        .into_iter()
        .find(|v| !v.is_finite() || *v < 0.0)
        .or_else(|| [area.x, area.y].into_iter().find(|v| !v.is_finite()))
        .unwrap_or(f32::NAN);
    LayoutError::InvalidSize(bad)
}

impl<C> LayoutEngine<C>
where
    C: Clone + Eq + Hash + Debug,
{
    /// Start with a single pane filling the configured area.
    ///
    /// Settings describing an unusable area fall back to the default size.
    pub fn new(content: C, settings: LayoutSettings) -> Self {
        let area = if settings.area().is_valid() {
            settings.area()
        } else {
            let fallback = LayoutSettings::default().area();
            tracing::warn!(
                "Invalid layout area {:?}, using {:?}",
                settings.area(),
                fallback
            );
            fallback
        };

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Slot {
            node: PartitionNode::leaf(content.clone(), None),
            parent: None,
        });
        let mut index = HashMap::new();
        index.insert(content, root);

        Self {
            nodes,
            root,
            index,
            removed: HashSet::new(),
            area,
            settings,
        }
    }

    pub fn leaf_of(&self, content: &C) -> Option<NodeId> {
        self.index.get(content).copied()
    }

    pub fn contains(&self, content: &C) -> bool {
        self.index.contains_key(content)
    }

    /// Split a pane in half, placing `content` in the secondary half.
    ///
    /// The pane's extent comes from the engine's own resolved geometry.
    pub fn split(
        &mut self,
        target: NodeId,
        content: C,
        orientation: Orientation,
    ) -> Result<Placement, LayoutError> {
        self.check_leaf(target)?;
        let extent = self
            .bounds_of(target)
            .map(|bounds| bounds.extent(orientation.axis()))
            .unwrap_or(0.0);
        self.split_with_extent(target, content, orientation, extent)
    }

    /// Like `split`, but asks the host how large the pane really is.
    ///
    /// Falls back to the engine's geometry when the host has no answer.
    pub fn split_measured<S>(
        &mut self,
        source: &S,
        target: NodeId,
        content: C,
        orientation: Orientation,
    ) -> Result<Placement, LayoutError>
    where
        S: ExtentSource<C> + ?Sized,
    {
        let axis = orientation.axis();
        let measured = source.extent(self.check_leaf(target)?, axis);
        let extent = match measured {
            Some(extent) => extent,
            None => self
                .bounds_of(target)
                .map(|bounds| bounds.extent(axis))
                .unwrap_or(0.0),
        };
        self.split_with_extent(target, content, orientation, extent)
    }

    fn split_with_extent(
        &mut self,
        target: NodeId,
        content: C,
        orientation: Orientation,
        extent: f32,
    ) -> Result<Placement, LayoutError> {
        let original = self.check_leaf(target)?.clone();
        if self.index.contains_key(&content) {
            return Err(LayoutError::DuplicateContent);
        }
        // Halving nothing would leave a split with no room on either side
        if !extent.is_finite() || extent <= 0.0 {
            return Err(LayoutError::InvalidSize(extent));
        }

        let parent = self.nodes[target].parent;
        let primary_size = extent / 2.0;
        let leaf = self.nodes.insert(Slot {
            node: PartitionNode::leaf(content.clone(), Some(original.clone())),
            parent: None,
        });
        let split = self.nodes.insert(Slot {
            node: PartitionNode::Split {
                orientation,
                primary: target,
                secondary: leaf,
                primary_size,
            },
            parent,
        });
        self.nodes[leaf].parent = Some(split);
        self.nodes[target].parent = Some(split);
        self.replace_child(parent, target, split);

        tracing::debug!(
            "Split {:?} {:?} at {}, new pane {:?}, total panes: {}",
            original,
            orientation,
            primary_size,
            content,
            self.index.len() + 1
        );
        self.index.insert(content, leaf);

        Ok(Placement {
            leaf,
            divider: DividerId(split),
        })
    }

    /// Remove a pane, giving its area to the other side of its split
    pub fn remove(&mut self, target: NodeId) -> Result<Removal<C>, LayoutError> {
        let content = self.check_leaf(target)?.clone();
        let neighbor = self.neighbor_of(target).cloned();

        let Some(parent) = self.nodes[target].parent else {
            return Ok(self.clear_root(target, content));
        };
        let sibling = match self.nodes[parent].node.children() {
            Some((primary, secondary)) if primary == target => secondary,
            Some((primary, _)) => primary,
            // Parents are always splits
            None => return Err(LayoutError::NotALeaf(target)),
        };

        let grandparent = self.nodes[parent].parent;
        self.replace_child(grandparent, parent, sibling);
        self.nodes[sibling].parent = grandparent;
        self.nodes.remove(parent);
        self.nodes.remove(target);
        self.index.remove(&content);
        self.removed.insert(target);

        let neighbor = neighbor.filter(|n| self.index.contains_key(n));
        let successor = self.first_leaf(sibling);
        tracing::debug!(
            "Removed pane {:?}, neighbor {:?}, remaining panes: {}",
            content,
            neighbor,
            self.index.len()
        );

        Ok(Removal {
            content,
            neighbor,
            successor: Some(successor),
        })
    }

    fn clear_root(&mut self, target: NodeId, content: C) -> Removal<C> {
        self.nodes.remove(target);
        self.root = self.nodes.insert(Slot {
            node: PartitionNode::Leaf {
                content: None,
                neighbor: None,
            },
            parent: None,
        });
        self.index.remove(&content);
        self.removed.insert(target);
        tracing::debug!("Removed last pane {:?}, layout is empty", content);

        Removal {
            content,
            neighbor: None,
            successor: None,
        }
    }

    /// Put content back into an emptied layout
    pub fn populate(&mut self, content: C) -> Result<NodeId, LayoutError> {
        if !self.is_empty() {
            return Err(LayoutError::NotEmpty);
        }
        let root = self.root;
        if let Some(PartitionNode::Leaf {
            content: slot_content,
            ..
        }) = self.nodes.get_mut(root).map(|slot| &mut slot.node)
        {
            *slot_content = Some(content.clone());
        }
        tracing::debug!("Populated empty layout with {:?}", content);
        self.index.insert(content, root);
        Ok(root)
    }
}
